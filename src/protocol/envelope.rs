use std::fmt;

use super::checksum::checksum;
use super::sentence::Sentence;

/// IEC 61162-450 tag block frame around one rendered sentence
///
/// Renders as `\g:<total>-<num>-<group>,s:<source>*<cs>\<sentence>`. The
/// sentence text is carried as-is, so it should already include its own
/// checksum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Number of sentences in the batch
    pub sentences_total: usize,
    /// 1-based position of this sentence in the batch
    pub sentence_num: usize,
    /// Rolling group identifier shared by the batch
    pub group_id: u8,
    /// Source identifier, empty when absent
    pub source_id: Option<String>,
    /// Rendered sentence
    pub sentence: String,
}

impl Envelope {
    pub fn new(
        sentences_total: usize,
        sentence_num: usize,
        group_id: u8,
        source_id: Option<String>,
        sentence: impl Into<String>,
    ) -> Self {
        Envelope {
            sentences_total,
            sentence_num,
            group_id,
            source_id,
            sentence: sentence.into(),
        }
    }

    /// Frames a sentence, rendering it with its checksum
    pub fn for_sentence(
        sentences_total: usize,
        sentence_num: usize,
        group_id: u8,
        source_id: Option<String>,
        sentence: &Sentence,
    ) -> Self {
        Self::new(sentences_total, sentence_num, group_id, source_id, sentence.to_string_with_checksum())
    }

    /// Tag body, without the delimiters and checksum
    pub fn tag(&self) -> String {
        format!(
            "g:{}-{}-{},s:{}",
            self.sentences_total,
            self.sentence_num,
            self.group_id,
            self.source_id.as_deref().unwrap_or("")
        )
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = self.tag();
        write!(f, "\\{}*{}\\{}", tag, checksum(&tag), self.sentence)
    }
}
