use serde::Deserialize;

use crate::domain::{Container, ContainerId, ContainerState, Image};
use crate::ports::{RuntimeError, RuntimeResult};

const SHORT_ID_LEN: usize = 12;

/// One line of `ps --format {{json .}}`. Missing or null text fields
/// decode as empty strings.
#[derive(Debug, Deserialize)]
struct ContainerRecord {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Names", default)]
    names: Option<String>,
    #[serde(rename = "Image", default)]
    image: Option<String>,
    #[serde(rename = "State", default)]
    state: Option<String>,
    #[serde(rename = "Status", default)]
    status: Option<String>,
    #[serde(rename = "Command", default)]
    command: Option<String>,
}

/// One line of `images --format {{json .}}`
#[derive(Debug, Deserialize)]
struct ImageRecord {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Repository", default)]
    repository: Option<String>,
    #[serde(rename = "Tag", default)]
    tag: Option<String>,
    #[serde(rename = "Size", default)]
    size: Option<String>,
}

/// Strip a `sha256:` prefix and truncate to 12 characters
pub fn short_id(id: &str) -> String {
    let id = id.strip_prefix("sha256:").unwrap_or(id);
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((end, _)) => id[..end].to_string(),
        None => id.to_string(),
    }
}

/// Anything that is not recognizably up is treated as exited
pub fn normalize_state(state: &str) -> ContainerState {
    let lower = state.to_lowercase();
    if lower.contains("up") || lower == "running" {
        ContainerState::Running
    } else {
        ContainerState::Exited
    }
}

/// Parse a human-readable size such as `132MB`, `1.2GB` or `5.6 kB` into
/// whole megabytes. Malformed numbers yield 0.
pub fn parse_size_mb(size: &str) -> u64 {
    let upper = size.trim().to_uppercase();
    let mut parts = upper.split_whitespace();
    let Some(first) = parts.next() else {
        return 0;
    };

    let (number, unit) = match parts.next() {
        Some(unit) => (first, unit),
        None => split_unit(first),
    };

    let Some(value) = leading_number(number) else {
        return 0;
    };

    let megabytes = match unit {
        "GB" => value * 1024.0,
        "KB" => value / 1024.0,
        "B" => value / 1024.0 / 1024.0,
        _ => value,
    };

    // float-to-int casts truncate toward zero and saturate negatives at 0
    megabytes as u64
}

fn split_unit(token: &str) -> (&str, &str) {
    for unit in ["GB", "MB", "KB", "B"] {
        if let Some(number) = token.strip_suffix(unit) {
            return (number, unit);
        }
    }
    (token, "MB")
}

/// Leading float literal: optional sign, digits, at most one `.`, and an
/// exponent only when digits follow it. `1.2` out of `1.2.3`, `1e3` out of
/// `1e3X`.
fn leading_number(token: &str) -> Option<f64> {
    let bytes = token.as_bytes();
    let digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    end += digits(end);
    if bytes.get(end) == Some(&b'.') {
        end += 1;
        end += digits(end);
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let count = digits(exponent);
        if count > 0 {
            end = exponent + count;
        }
    }

    token[..end].parse::<f64>().ok()
}

fn records(output: &str) -> impl Iterator<Item = &str> {
    output.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Parse `ps -a` output, one JSON record per line
pub fn parse_containers(output: &str) -> RuntimeResult<Vec<Container>> {
    records(output)
        .map(|line| {
            let record: ContainerRecord = serde_json::from_str(line)
                .map_err(|source| RuntimeError::Parse { what: "container", source })?;

            Ok(Container::new(
                ContainerId::new(short_id(&record.id)),
                record.names.unwrap_or_default(),
                record.image.unwrap_or_default(),
                normalize_state(record.state.as_deref().unwrap_or_default()),
            )
            .with_status(record.status.unwrap_or_default())
            .with_command(record.command.unwrap_or_default()))
        })
        .collect()
}

/// Parse `images` output, one JSON record per line
pub fn parse_images(output: &str) -> RuntimeResult<Vec<Image>> {
    records(output)
        .map(|line| {
            let record: ImageRecord = serde_json::from_str(line)
                .map_err(|source| RuntimeError::Parse { what: "image", source })?;

            let repo_tags = format!(
                "{}:{}",
                record.repository.unwrap_or_default(),
                record.tag.unwrap_or_default()
            );
            Ok(Image::new(
                short_id(&record.id),
                repo_tags.trim(),
                parse_size_mb(record.size.as_deref().unwrap_or_default()),
            ))
        })
        .collect()
}
