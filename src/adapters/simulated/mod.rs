mod memory;

pub use memory::SimulatedAdapter;
