use serde::Serialize;

/// Short-form container identifier (at most 12 characters for engine ids)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ContainerId(String);

impl ContainerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ContainerId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// Container lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerState {
    Running,
    Exited,
}

impl ContainerState {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

/// Container entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Container {
    pub id: ContainerId,
    pub name: String,
    pub image: String,
    pub state: ContainerState,
    pub status: String,
    pub command: String,
}

impl Container {
    pub fn new(id: ContainerId, name: String, image: String, state: ContainerState) -> Self {
        Self {
            id,
            name,
            image,
            state,
            status: String::new(),
            command: String::new(),
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    /// Move the container to a new lifecycle phase
    pub fn transition(&mut self, state: ContainerState, status: &str) {
        self.state = state;
        self.status = status.to_string();
    }
}
