mod decision;
mod prediction;
mod publication;

pub use decision::DecisionCommands;
pub use prediction::PredictionCommands;
pub use publication::PublicationCommands;

use sdg_core::label::SdgLabel;

/// Parse `7`, `sdg7` or `none` into a label.
pub fn parse_label(value: &str) -> Result<SdgLabel, String> {
    let lowered = value.trim().to_ascii_lowercase();
    if lowered == "none" {
        return Ok(SdgLabel::NOT_RELEVANT);
    }
    let digits = lowered.strip_prefix("sdg").unwrap_or(&lowered);
    let number: u8 = digits
        .parse()
        .map_err(|_| format!("'{value}' is not an SDG label"))?;
    SdgLabel::new(number).map_err(|error| error.to_string())
}
