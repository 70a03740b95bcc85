//! Stream classification: bucket streams by type and tally them.

use serde::Serialize;
use tf_core::StreamType;
use tf_probe::StreamRecord;

/// Aggregated state for one stream type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TypeTally {
    /// Number of streams of this type.
    pub count: usize,
    /// Whether any stream of this type carried a non-empty title.
    pub title_seen: bool,
}

/// Per-type tallies for video, audio, and subtitle streams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StreamTally {
    pub video: TypeTally,
    pub audio: TypeTally,
    pub subtitle: TypeTally,
}

impl StreamTally {
    /// The tally for `ty`.
    pub fn get(&self, ty: StreamType) -> TypeTally {
        match ty {
            StreamType::Video => self.video,
            StreamType::Audio => self.audio,
            StreamType::Subtitle => self.subtitle,
        }
    }

    fn get_mut(&mut self, ty: StreamType) -> &mut TypeTally {
        match ty {
            StreamType::Video => &mut self.video,
            StreamType::Audio => &mut self.audio,
            StreamType::Subtitle => &mut self.subtitle,
        }
    }

    /// Count one stream of `ty`, returning its 0-based ordinal within the type.
    fn record(&mut self, ty: StreamType, has_title: bool) -> usize {
        let tally = self.get_mut(ty);
        let ordinal = tally.count;
        tally.count += 1;
        tally.title_seen |= has_title;
        ordinal
    }
}

/// A video, audio, or subtitle stream with its position inside its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedStream<'a> {
    pub record: &'a StreamRecord,
    pub stream_type: StreamType,
    /// 0-based ordinal among streams of the same type, as used by ffmpeg's
    /// `s:<letter>:<n>` stream specifiers.
    pub type_index: usize,
}

impl<'a> ClassifiedStream<'a> {
    /// The stream's title, treating an empty tag as absent.
    pub fn title(&self) -> Option<&'a str> {
        self.record.title()
    }
}

/// Classify `streams` in order.
///
/// Streams whose codec type is not video, audio, or subtitle are dropped and
/// do not affect any tally.
pub fn classify(streams: &[StreamRecord]) -> (Vec<ClassifiedStream<'_>>, StreamTally) {
    streams.iter().fold(
        (Vec::with_capacity(streams.len()), StreamTally::default()),
        |(mut classified, mut tally), record| {
            if let Some(stream_type) = record.stream_type() {
                let type_index = tally.record(stream_type, record.title().is_some());
                classified.push(ClassifiedStream {
                    record,
                    stream_type,
                    type_index,
                });
            }
            (classified, tally)
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_every_stream_of_each_type() {
        let streams = vec![
            StreamRecord::new(0, "video", None),
            StreamRecord::new(1, "audio", Some("English")),
            StreamRecord::new(2, "audio", None),
            StreamRecord::new(3, "subtitle", Some("")),
        ];
        let (_, tally) = classify(&streams);

        assert_eq!(tally.video, TypeTally { count: 1, title_seen: false });
        assert_eq!(tally.audio, TypeTally { count: 2, title_seen: true });
        assert_eq!(tally.subtitle, TypeTally { count: 1, title_seen: false });
    }

    #[test]
    fn type_index_counts_within_type() {
        let streams = vec![
            StreamRecord::new(0, "video", None),
            StreamRecord::new(1, "audio", None),
            StreamRecord::new(2, "subtitle", None),
            StreamRecord::new(3, "audio", None),
            StreamRecord::new(4, "subtitle", None),
        ];
        let (classified, _) = classify(&streams);

        let positions: Vec<(u32, char, usize)> = classified
            .iter()
            .map(|c| (c.record.index, c.stream_type.letter(), c.type_index))
            .collect();
        assert_eq!(
            positions,
            vec![(0, 'v', 0), (1, 'a', 0), (2, 's', 0), (3, 'a', 1), (4, 's', 1)]
        );
    }

    #[test]
    fn other_codec_types_are_ignored() {
        let streams = vec![
            StreamRecord::new(0, "data", Some("Chapters")),
            StreamRecord::new(1, "attachment", Some("font.ttf")),
            StreamRecord::new(2, "AUDIO", Some("Stereo")),
        ];
        let (classified, tally) = classify(&streams);

        assert_eq!(classified.len(), 1);
        assert_eq!(classified[0].stream_type, StreamType::Audio);
        assert_eq!(tally.video, TypeTally::default());
        assert_eq!(tally.subtitle, TypeTally::default());
        assert_eq!(tally.get(StreamType::Audio).count, 1);
    }

    #[test]
    fn empty_stream_list() {
        let (classified, tally) = classify(&[]);
        assert!(classified.is_empty());
        assert_eq!(tally, StreamTally::default());
    }
}
