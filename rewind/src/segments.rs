//! # Segments Module - Text Segments and the Speed Overview
//!
//! A segmentation splits the reference text into contiguous slices, each with its own WPM
//! and raw WPM. It backs the bar-chart overview of a replay and lets a click on a bar seek
//! to the start of that slice.
//!
//! Segmentations are either supplied with the recording, or computed from the delay
//! timelines with [`Segmentation::from_delays`], which partitions the text on word
//! boundaries using [`partition`].
//!
//! ```rust
//! use rewind::segments::partition;
//!
//! let segments = partition("the quick brown fox");
//! assert_eq!(segments, vec!["the ", "quick ", "brown ", "fox"]);
//! ```

use serde::{Deserialize, Serialize};

use crate::{GraphData, MalformedLog, Millis, wpm};

/// Upper bound on the amount of segments [`partition`] produces
pub const MAX_SEGMENTS: usize = 10;

/// Texts up to this length get one segment per word
const SHORT_TEXT_LEN: usize = 60;

/// A contiguous slice of the reference text with its speed statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub wpm: f64,
    pub raw_wpm: f64,
}

/// Bar heights in `0.0..=1.0`, relative to the chart ceiling
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct BarHeights {
    pub wpm: f64,
    pub raw: f64,
}

/// Validated segments with their starting character offsets
#[derive(Debug, Clone, PartialEq)]
pub struct Segmentation {
    segments: Vec<Segment>,
    offsets: Vec<usize>,
    ymax: f64,
    yticks: Vec<f64>,
}

impl Segmentation {
    /// Validate supplied segment data against a text of `text_len` characters.
    ///
    /// The segments must cover the text exactly. An empty segment list is accepted and simply
    /// has no segments to seek to.
    pub fn new(graph: GraphData, text_len: usize) -> Result<Self, MalformedLog> {
        let GraphData {
            segments,
            ymax,
            yticks,
        } = graph;

        let mut offsets = Vec::with_capacity(segments.len());
        let mut offset = 0;
        for segment in &segments {
            offsets.push(offset);
            offset += segment.text.chars().count();
        }

        if !segments.is_empty() && offset != text_len {
            return Err(MalformedLog::SegmentLength {
                expected: text_len,
                found: offset,
            });
        }

        let ymax = ymax
            .filter(|ymax| *ymax > 0.0)
            .unwrap_or_else(|| highest_value(&segments));

        let yticks = yticks
            .filter(|ticks| !ticks.is_empty())
            .unwrap_or_else(default_yticks);

        Ok(Self {
            segments,
            offsets,
            ymax,
            yticks,
        })
    }

    /// Partition `text` with [`partition`] and compute each segment's speed from the delays.
    pub fn from_delays(
        text: &str,
        delays: &[Millis],
        raw_delays: &[Millis],
    ) -> Result<Self, MalformedLog> {
        let text_len = text.chars().count();
        if delays.len() != text_len {
            return Err(MalformedLog::DelayCount {
                expected: text_len,
                found: delays.len(),
            });
        }
        if raw_delays.len() != text_len {
            return Err(MalformedLog::RawDelayCount {
                expected: text_len,
                found: raw_delays.len(),
            });
        }

        let mut start = 0;
        let segments = partition(text)
            .into_iter()
            .map(|text| {
                let end = start + text.chars().count();
                let time: Millis = delays[start..end].iter().sum();
                let raw_time: Millis = raw_delays[start..end].iter().sum();
                let length = end - start;
                start = end;

                Segment {
                    text,
                    wpm: wpm(length, time / 1000.0),
                    raw_wpm: wpm(length, raw_time / 1000.0),
                }
            })
            .collect();

        Self::new(
            GraphData {
                segments,
                ymax: None,
                yticks: None,
            },
            text_len,
        )
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Segments paired with the character offset they start at
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Segment)> {
        self.offsets.iter().copied().zip(&self.segments)
    }

    /// Character offset where segment `index` starts
    pub fn char_offset_for_segment(&self, index: usize) -> Option<usize> {
        self.offsets.get(index).copied()
    }

    /// The chart ceiling
    pub fn ymax(&self) -> f64 {
        self.ymax
    }

    /// WPM axis ticks
    pub fn yticks(&self) -> &[f64] {
        &self.yticks
    }

    /// Height of each segment's bars relative to the chart ceiling
    pub fn bar_heights(&self) -> Vec<BarHeights> {
        self.segments
            .iter()
            .map(|segment| {
                if self.ymax > 0.0 {
                    BarHeights {
                        wpm: segment.wpm / self.ymax,
                        raw: segment.raw_wpm / self.ymax,
                    }
                } else {
                    BarHeights::default()
                }
            })
            .collect()
    }
}

fn highest_value(segments: &[Segment]) -> f64 {
    segments
        .iter()
        .map(|segment| segment.wpm.max(segment.raw_wpm))
        .fold(0.0, f64::max)
}

fn default_yticks() -> Vec<f64> {
    (0..=200).step_by(25).map(f64::from).collect()
}

/// Split a text into at most [`MAX_SEGMENTS`] word-aligned segments.
///
/// Short texts (few words, or at most 60 characters) get one segment per word, each word
/// keeping its trailing space. Longer texts are cut into equal slices and every cut is then
/// aligned to a word start. The first cut always moves forward. Later cuts move forward when
/// that adds no more characters than moving back would drop, and back otherwise. If a cut
/// cannot be aligned either way, the text is partitioned again into one segment less.
/// A leading three-word segment followed by a one-word segment gives its last word away.
/// Concatenating the segments always yields `text`.
pub fn partition(text: &str) -> Vec<String> {
    let characters: Vec<char> = text.chars().collect();
    let count = ((characters.len() as f64 / 10.0).round_ties_even() as usize).min(MAX_SEGMENTS);

    partition_into(text, &characters, count)
}

fn partition_into(text: &str, characters: &[char], count: usize) -> Vec<String> {
    let word_count = text.split(' ').count();

    if word_count <= count || characters.len() <= SHORT_TEXT_LEN {
        return text.split_inclusive(' ').map(str::to_string).collect();
    }

    if count < 2 {
        return vec![text.to_string()];
    }

    let slice_len = characters.len() as f64 / count as f64;
    let mut cuts: Vec<usize> = (0..count)
        .map(|i| (slice_len * i as f64).round_ties_even() as usize)
        .collect();
    cuts.push(characters.len());

    for i in 0..count - 1 {
        let (start, cut, end) = (cuts[i], cuts[i + 1], cuts[i + 2]);
        let segment = &characters[start..cut];
        let next = &characters[cut..end];

        let dropped = segment
            .iter()
            .rposition(|c| *c == ' ')
            .map_or(segment.len(), |space| segment.len() - space - 1);
        let added = next.iter().position(|c| *c == ' ').map_or(0, |space| space + 1);

        let aligned = if i == 0 || dropped >= added {
            extend_cut(characters, start, cut, end).or_else(|| trim_cut(characters, start, cut))
        } else {
            trim_cut(characters, start, cut).or_else(|| extend_cut(characters, start, cut, end))
        };

        match aligned {
            Some(aligned) => cuts[i + 1] = aligned,
            None => return partition_into(text, characters, count - 1),
        }
    }

    let mut segments: Vec<String> = cuts
        .windows(2)
        .map(|pair| characters[pair[0]..pair[1]].iter().collect())
        .collect();
    rebalance_head(&mut segments);
    segments
}

/// Move `cut` forward until the segment `start..cut` ends with a space, without passing `end`
fn extend_cut(characters: &[char], start: usize, mut cut: usize, end: usize) -> Option<usize> {
    loop {
        if cut == start {
            return None;
        }
        if characters[cut - 1] == ' ' {
            return Some(cut);
        }
        if cut == end {
            return None;
        }
        cut += 1;
    }
}

/// Move `cut` back until the segment `start..cut` ends with a space, without emptying it
fn trim_cut(characters: &[char], start: usize, mut cut: usize) -> Option<usize> {
    loop {
        if cut == start {
            return None;
        }
        if characters[cut - 1] == ' ' {
            return Some(cut);
        }
        cut -= 1;
    }
}

fn rebalance_head(segments: &mut [String]) {
    // The second segment must end on a space for the concatenation to stay intact
    if segments.len() < 3 {
        return;
    }

    let rebalanced = {
        let first: Vec<&str> = without_last(&segments[0]).split(' ').collect();
        let second: Vec<&str> = without_last(&segments[1]).split(' ').collect();

        match (first.as_slice(), second.as_slice()) {
            ([a, b, c], [d]) => Some((format!("{a} {b} "), format!("{c} {d} "))),
            _ => None,
        }
    };

    if let Some((head, tail)) = rebalanced {
        segments[0] = head;
        segments[1] = tail;
    }
}

fn without_last(segment: &str) -> &str {
    segment
        .char_indices()
        .next_back()
        .map_or(segment, |(index, _)| &segment[..index])
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn segment(text: &str, wpm: f64, raw_wpm: f64) -> Segment {
        Segment {
            text: text.to_string(),
            wpm,
            raw_wpm,
        }
    }

    fn graph(segments: Vec<Segment>) -> GraphData {
        GraphData {
            segments,
            ymax: None,
            yticks: None,
        }
    }

    #[test]
    fn test_offsets() {
        let segmentation = Segmentation::new(
            graph(vec![
                segment("the ", 80.0, 90.0),
                segment("quick ", 100.0, 110.0),
                segment("fox", 60.0, 70.0),
            ]),
            13,
        )
        .unwrap();

        assert_eq!(segmentation.char_offset_for_segment(0), Some(0));
        assert_eq!(segmentation.char_offset_for_segment(1), Some(4));
        assert_eq!(segmentation.char_offset_for_segment(2), Some(10));
        assert_eq!(segmentation.char_offset_for_segment(3), None);

        let offsets: Vec<_> = segmentation.iter().map(|(offset, _)| offset).collect();
        assert_eq!(offsets, vec![0, 4, 10]);
    }

    #[test]
    fn test_rejects_wrong_coverage() {
        let result = Segmentation::new(graph(vec![segment("the ", 1.0, 1.0)]), 13);
        assert_matches!(
            result,
            Err(MalformedLog::SegmentLength {
                expected: 13,
                found: 4
            })
        );

        // No segments at all is fine
        let segmentation = Segmentation::new(graph(Vec::new()), 13).unwrap();
        assert!(segmentation.is_empty());
        assert_eq!(segmentation.char_offset_for_segment(0), None);
    }

    #[test]
    fn test_ymax_and_bar_heights() {
        let segments = vec![segment("ab", 50.0, 100.0), segment("cd", 25.0, 40.0)];

        let segmentation = Segmentation::new(graph(segments.clone()), 4).unwrap();
        assert_eq!(segmentation.ymax(), 100.0);
        assert_eq!(
            segmentation.bar_heights(),
            vec![
                BarHeights {
                    wpm: 0.5,
                    raw: 1.0
                },
                BarHeights {
                    wpm: 0.25,
                    raw: 0.4
                },
            ]
        );

        let supplied = GraphData {
            segments,
            ymax: Some(200.0),
            yticks: Some(vec![0.0, 100.0, 200.0]),
        };
        let segmentation = Segmentation::new(supplied, 4).unwrap();
        assert_eq!(segmentation.ymax(), 200.0);
        assert_eq!(segmentation.bar_heights()[0].wpm, 0.25);
        assert_eq!(segmentation.yticks(), &[0.0, 100.0, 200.0]);
    }

    #[test]
    fn test_default_yticks() {
        let segmentation = Segmentation::new(graph(vec![segment("a", 1.0, 1.0)]), 1).unwrap();
        assert_eq!(
            segmentation.yticks(),
            &[0.0, 25.0, 50.0, 75.0, 100.0, 125.0, 150.0, 175.0, 200.0]
        );
    }

    #[test]
    fn test_partition_short_text() {
        assert_eq!(partition("hello world"), vec!["hello ", "world"]);
        assert_eq!(partition("a"), vec!["a"]);
    }

    #[test]
    fn test_partition_long_text() {
        let text = "The quick brown fox jumps over the lazy dog while the cat sleeps soundly \
                    on the warm windowsill, dreaming of mice and sunny afternoons in the garden.";
        let segments = partition(text);

        assert!(segments.len() > 1);
        assert!(segments.len() <= MAX_SEGMENTS);
        assert_eq!(segments.concat(), text);

        // Every segment but the last ends on a word boundary
        for segment in &segments[..segments.len() - 1] {
            assert!(segment.ends_with(' '), "{segment:?} is not word-aligned");
        }
    }

    #[test]
    fn test_partition_first_cut_moves_forward() {
        let text = "The quick brown fox jumps over the lazy dog while the cat sleeps soundly \
                    on the warm windowsill, dreaming of mice and sunny afternoons in the garden.";

        assert_eq!(
            partition(text),
            vec![
                "The quick brown ",
                "fox jumps over ",
                "the lazy dog ",
                "while the cat ",
                "sleeps soundly ",
                "on the warm ",
                "windowsill, dreaming ",
                "of mice and ",
                "sunny afternoons ",
                "in the garden.",
            ]
        );
    }

    #[test]
    fn test_partition_cuts_move_to_the_cheaper_side() {
        let text = "Sphinx of black quartz, judge my vow. \
                    Pack my box with five dozen liquor jugs today.";

        assert_eq!(
            partition(text),
            vec![
                "Sphinx of ",
                "black quartz, ",
                "judge my ",
                "vow. Pack ",
                "my box ",
                "with five dozen ",
                "liquor ",
                "jugs today.",
            ]
        );
    }

    #[test]
    fn test_partition_rebalances_a_lone_word() {
        let text = "is lemon island my dragon cherry no garden jungle we he it as so be am";

        let segments = partition(text);
        assert_eq!(segments[0], "is lemon ");
        assert_eq!(segments[1], "island my ");
        assert_eq!(segments.concat(), text);
    }

    #[test]
    fn test_partition_without_spaces() {
        let text = "a".repeat(120);
        assert_eq!(partition(&text), vec![text.clone()]);
    }

    #[test]
    fn test_from_delays() {
        let segmentation =
            Segmentation::from_delays("ab cd", &[100.0; 5], &[50.0, 50.0, 50.0, 50.0, 50.0])
                .unwrap();

        assert_eq!(segmentation.len(), 2);
        let first = &segmentation.segments()[0];
        assert_eq!(first.text, "ab ");
        // 3 characters in 0.3 seconds, and in 0.15 seconds of active typing
        assert!((first.wpm - 120.0).abs() < 1e-9);
        assert!((first.raw_wpm - 240.0).abs() < 1e-9);
        assert_eq!(segmentation.char_offset_for_segment(1), Some(3));

        assert_matches!(
            Segmentation::from_delays("ab", &[1.0], &[1.0, 1.0]),
            Err(MalformedLog::DelayCount { .. })
        );
    }
}
