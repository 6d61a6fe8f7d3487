//! Prompt construction for image, video and caption requests.

use crate::types::{ArtifactKind, GenerationRequest};

/// Composite prompt for an image batch. A non-blank overlay becomes a text-rendering instruction.
pub fn image_prompt(request: &GenerationRequest) -> String {
    match request.overlay() {
        Some(overlay) => format!(
            "{}. Render the following text clearly and legibly on the image: \"{overlay}\"",
            request.prompt.trim()
        ),
        None => request.prompt.trim().to_string(),
    }
}

/// Prompt for a video job. A non-blank music hint becomes a soundtrack direction.
pub fn video_prompt(request: &GenerationRequest) -> String {
    match request.music_hint() {
        Some(music) => format!(
            "{}. Background music: {music}",
            request.prompt.trim()
        ),
        None => request.prompt.trim().to_string(),
    }
}

/// Instruction sent to the language model when asking for a caption.
pub fn caption_instruction(prompt: &str, kind: ArtifactKind) -> String {
    let medium = match kind {
        ArtifactKind::Video => "video",
        ArtifactKind::Image => "image",
    };
    format!(
        "Write a short, engaging social media caption for a {medium} described as: \"{}\". \
         Include two or three relevant hashtags. Reply with the caption only.",
        prompt.trim()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_prompt_without_overlay_is_the_prompt() {
        let request = GenerationRequest::new("  a red bicycle ");
        assert_eq!(image_prompt(&request), "a red bicycle");
    }

    #[test]
    fn image_prompt_appends_overlay_instruction() {
        let request = GenerationRequest::builder()
            .prompt("a red bicycle")
            .overlay("SUMMER SALE")
            .build();
        let prompt = image_prompt(&request);
        assert!(prompt.starts_with("a red bicycle."));
        assert!(prompt.ends_with("\"SUMMER SALE\""));
    }

    #[test]
    fn empty_overlay_is_ignored() {
        let request = GenerationRequest::builder()
            .prompt("a red bicycle")
            .overlay("")
            .build();
        assert_eq!(image_prompt(&request), "a red bicycle");
    }

    #[test]
    fn video_prompt_mentions_music() {
        let request = GenerationRequest::builder()
            .prompt("waves at dusk")
            .music_hint("lo-fi piano")
            .build();
        assert_eq!(video_prompt(&request), "waves at dusk. Background music: lo-fi piano");
    }

    #[test]
    fn caption_instruction_quotes_prompt() {
        let text = caption_instruction("waves at dusk", ArtifactKind::Video);
        assert!(text.contains("a video described as: \"waves at dusk\""));
    }
}
