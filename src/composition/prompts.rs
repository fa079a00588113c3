// Prompt builder for the two composites

/// Instructions for the artistic and expository generations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub artistic: String,
    pub expository: String,
}

/// Build both prompts from a style label and a hex color
pub fn build_prompts(style: &str, color_hex: &str) -> PromptPair {
    PromptPair {
        artistic: build_artistic_prompt(style, color_hex),
        expository: build_expository_prompt(color_hex),
    }
}

fn color_instruction(color_hex: &str) -> String {
    format!(
        "The overall color palette should be heavily influenced by the hex color '{}'. \
         Use it to guide the lighting, mood, and background tones.",
        color_hex
    )
}

fn build_artistic_prompt(style: &str, color_hex: &str) -> String {
    format!(
        "Using the provided scenario image as the base, create a high-quality, artistic advertising \
         photograph in a '{}' style. Seamlessly integrate the provided model. The model should be \
         styled wearing the three provided clothing items together with the accessory in a \
         fashionable and coherent outfit. The final composition must be a single cohesive, \
         gallery-quality image that is professional and visually stunning. {}",
        style,
        color_instruction(color_hex)
    )
}

fn build_expository_prompt(color_hex: &str) -> String {
    format!(
        "Using the provided scenario image as a subtle, clean background, create a well-lit \
         product-focused image. Arrange the model, the three clothing items, and the accessory in a \
         clear, expository composition, like a high-end catalog or lookbook. Each element must be \
         distinct and easily identifiable. The model should be wearing all three clothing items and \
         the accessory. {}",
        color_instruction(color_hex)
    )
}
