/// Style directive appended to every logo prompt.
pub const LOGO_STYLE: &str =
    "Style: Minimalist, vector, flat, gradient, modern, tech, white background.\nHigh quality, high resolution, 4k.";

pub fn name_prompt(description: &str) -> String {
    format!(
        "Act as a world-class branding agency.\n\
         Project: {description}\n\
         Task: Create 3 unique, modern, and memorable brand names.\n\
         Output: ONLY the 3 names separated by commas. No numbering. No extra commentary."
    )
}

pub fn logo_prompt(name: &str, description: &str) -> String {
    format!("Logo for \"{name}\". {description}.\n{LOGO_STYLE}")
}
