use std::collections::VecDeque;

use serde::Serialize;

/// One player-visible line. An empty speaker marks narration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DialogueLine {
    pub speaker: String,
    pub text: String,
}

impl DialogueLine {
    pub fn new(speaker: &str, text: &str) -> Self {
        DialogueLine {
            speaker: speaker.to_string(),
            text: text.to_string(),
        }
    }

    pub fn narration(text: &str) -> Self {
        Self::new("", text)
    }

    pub fn is_narration(&self) -> bool {
        self.speaker.is_empty()
    }

    fn log_message(&self) -> String {
        format!("dialogue.line [{}] {}", self.speaker, self.text)
    }
}

#[derive(Debug)]
struct ActiveRequest {
    lines: Vec<DialogueLine>,
    index: usize,
}

/// Serializes dialogue requests into a one-line-at-a-time presentation.
///
/// A request issued while another is presenting is queued behind it, never
/// interleaved. Advancing is an external signal from the rendering layer;
/// the sequencer only tracks exposure order. Mutations return event-log
/// messages for the owning runtime to record.
#[derive(Debug, Default)]
pub struct DialogueSequencer {
    current: Option<ActiveRequest>,
    queued: VecDeque<Vec<DialogueLine>>,
}

impl DialogueSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues a complete request. Empty requests are dropped.
    pub fn begin(&mut self, lines: Vec<DialogueLine>) -> Vec<String> {
        if lines.is_empty() {
            return Vec::new();
        }
        if self.current.is_some() {
            self.queued.push_back(lines);
            return vec![format!("dialogue.queued ({} waiting)", self.queued.len())];
        }
        self.present(lines)
    }

    /// External advance signal. Exposes the next line, or finishes the
    /// request and promotes the next queued one.
    pub fn advance(&mut self) -> Vec<String> {
        let Some(active) = self.current.as_mut() else {
            return Vec::new();
        };
        active.index += 1;
        if active.index < active.lines.len() {
            return vec![active.lines[active.index].log_message()];
        }
        self.current = None;
        let mut messages = vec!["dialogue.end".to_string()];
        if let Some(next) = self.queued.pop_front() {
            messages.extend(self.present(next));
        }
        messages
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    pub fn current_line(&self) -> Option<&DialogueLine> {
        let active = self.current.as_ref()?;
        active.lines.get(active.index)
    }

    pub fn queued_len(&self) -> usize {
        self.queued.len()
    }

    fn present(&mut self, lines: Vec<DialogueLine>) -> Vec<String> {
        let messages = vec![
            format!("dialogue.begin ({} lines)", lines.len()),
            lines[0].log_message(),
        ];
        self.current = Some(ActiveRequest { lines, index: 0 });
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::{DialogueLine, DialogueSequencer};

    fn exchange(texts: &[&str]) -> Vec<DialogueLine> {
        texts
            .iter()
            .map(|text| DialogueLine::new("Ryan", text))
            .collect()
    }

    #[test]
    fn lines_expose_in_order() {
        let mut sequencer = DialogueSequencer::new();
        sequencer.begin(exchange(&["one", "two", "three"]));

        assert_eq!(sequencer.current_line().map(|l| l.text.as_str()), Some("one"));
        sequencer.advance();
        assert_eq!(sequencer.current_line().map(|l| l.text.as_str()), Some("two"));
        sequencer.advance();
        assert_eq!(sequencer.current_line().map(|l| l.text.as_str()), Some("three"));
        let messages = sequencer.advance();
        assert!(messages.contains(&"dialogue.end".to_string()));
        assert!(!sequencer.is_active());
    }

    #[test]
    fn second_request_waits_for_the_first() {
        let mut sequencer = DialogueSequencer::new();
        sequencer.begin(exchange(&["a1", "a2"]));
        sequencer.begin(exchange(&["b1"]));

        let mut exposed = vec![sequencer.current_line().unwrap().text.clone()];
        loop {
            sequencer.advance();
            match sequencer.current_line() {
                Some(line) => exposed.push(line.text.clone()),
                None => break,
            }
        }
        assert_eq!(exposed, vec!["a1", "a2", "b1"]);
    }

    #[test]
    fn narration_has_an_empty_speaker() {
        let mut sequencer = DialogueSequencer::new();
        let messages = sequencer.begin(vec![DialogueLine::narration("*Door lock disengages*")]);
        assert!(sequencer.current_line().unwrap().is_narration());
        assert_eq!(
            messages[1],
            "dialogue.line [] *Door lock disengages*".to_string()
        );
    }

    #[test]
    fn empty_request_is_dropped() {
        let mut sequencer = DialogueSequencer::new();
        assert!(sequencer.begin(Vec::new()).is_empty());
        assert!(!sequencer.is_active());
    }

    #[test]
    fn advance_with_nothing_active_is_a_no_op() {
        let mut sequencer = DialogueSequencer::new();
        assert!(sequencer.advance().is_empty());
    }
}
