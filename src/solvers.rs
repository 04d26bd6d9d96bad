mod augmentation;
mod label_registry;
mod label_setting;
mod search;

pub use augmentation::{solve, Espprc};
pub use label_registry::{InsertionResult, LabelId, LabelNode, LabelRegistry};
pub use label_setting::{LabelSettingSearch, SearchOutcome};
pub use search::{SearchStatistics, Solution, SolverParameters};
