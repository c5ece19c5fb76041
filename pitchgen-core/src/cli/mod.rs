pub mod args;

pub use args::{Cli, Commands, HistoryAction, InputArgs, TemplateOverrideArgs};
