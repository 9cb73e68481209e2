mod assemble;
mod classify;
mod eligibility;
mod score;
mod tab;

pub use assemble::{AssembleShape, Delivery, ExhaustedTab, ShapeOutput};
pub use classify::classify_enclosure;
pub use eligibility::EdgeEligibility;
pub use score::ScoreLine;
pub use tab::{MakeTab, Tab};
