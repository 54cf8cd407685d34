pub mod generation_flow;
pub mod view_model;

#[cfg(test)]
pub(crate) mod testing;

pub use generation_flow::GenerationFlow;
pub use view_model::{Action, OptionState, Phase, ViewModel};
