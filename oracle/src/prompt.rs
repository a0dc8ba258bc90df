//! Instruction text sent to the annotation oracle.

use crate::types::{DeepAnalysisRequest, SegmentRequest};

/// Build the instruction for one segment annotation call.
///
/// The segment position is stated for the oracle's own continuity
/// reasoning across chunks; the client never interprets it.
pub fn segment_instruction(request: &SegmentRequest) -> String {
    format!(
        "You are an expert philologist specializing in historical languages.\n\
         Analyze Chunk {index} of {total}.\n\
         Break it down into tokens (words, punctuation, and newlines).\n\
         \n\
         RULES:\n\
         - Output EXACTLY as JSON.\n\
         - Preserve visual structure: If a newline exists, output a token where \"original\" is \"\\n\".\n\
         - Do not output tokens for spaces.\n\
         - Provide rich grammatical morphology for the specific context.\n\
         \n\
         Text to analyze:\n\
         \"{text}\"",
        index = request.index,
        total = request.total,
        text = request.text,
    )
}

/// Build the instruction for a single-token deep analysis call.
pub fn deep_analysis_instruction(request: &DeepAnalysisRequest) -> String {
    format!(
        "You are an expert philologist specializing in historical languages.\n\
         Re-examine the gloss of the word \"{original}\" (currently lemmatized as \"{lemma}\")\n\
         as it occurs in this passage:\n\
         \n\
         \"{context}\"\n\
         \n\
         Verify the definition, lemma, part of speech, morphology, and etymology\n\
         against authoritative dictionaries, and return the corrected gloss as a\n\
         single JSON object. Keep the morphology contextual to this occurrence.",
        original = request.original,
        lemma = request.lemma,
        context = request.context,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_instruction_states_chunk_position_and_rules() {
        let request = SegmentRequest::new("Hwæt! Wē Gārdena", 2, 5);
        let prompt = segment_instruction(&request);

        assert!(prompt.contains("Chunk 2 of 5"));
        assert!(prompt.contains("Hwæt! Wē Gārdena"));
        assert!(prompt.contains("Do not output tokens for spaces."));
        assert!(prompt.contains("\"original\" is \"\\n\""));
    }

    #[test]
    fn deep_analysis_instruction_carries_lemma_and_context() {
        let request = DeepAnalysisRequest::new("cwæð", "cweþan", "Hē cwæð .");
        let prompt = deep_analysis_instruction(&request);

        assert!(prompt.contains("\"cwæð\""));
        assert!(prompt.contains("\"cweþan\""));
        assert!(prompt.contains("Hē cwæð ."));
    }
}
