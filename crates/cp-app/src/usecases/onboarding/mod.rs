mod progress;
mod wizard;

pub use progress::{ProgressError, ProgressTracker};
pub use wizard::{OnboardingError, OnboardingWizard, WizardView};
