// Copyright (c) 2024 Mike Tsao

use anyhow::anyhow;
use midly::{
    num::{u15, u28},
    Format, Header, MetaMessage, Smf, Timing, TrackEvent, TrackEventKind,
};
use mifi::{types::MidiEvent, util::MidiUtils};
use std::path::Path;

/// Writes [MidiEvent]s as a single-track standard MIDI file.
#[derive(Debug, Default)]
pub struct MidiFilePort {}
impl MidiFilePort {
    /// Encodes `events` (absolute ticks, any order) as SMF bytes with
    /// `ticks_per_beat` metrical timing. Fails if the timing doesn't fit in 15
    /// bits or a gap between events doesn't fit in 28.
    pub fn to_bytes(events: &[MidiEvent], ticks_per_beat: u16) -> anyhow::Result<Vec<u8>> {
        if ticks_per_beat == 0 || ticks_per_beat > u15::max_value().as_int() {
            return Err(anyhow!("ticks per beat {ticks_per_beat} out of range"));
        }
        let mut events = events.to_vec();
        MidiUtils::sort_events(&mut events);

        let mut track = Vec::with_capacity(events.len() + 1);
        let mut last_tick = 0;
        for event in &events {
            track.push(TrackEvent {
                delta: Self::delta(event.tick - last_tick)?,
                kind: TrackEventKind::Midi {
                    channel: event.channel.into(),
                    message: event.message,
                },
            });
            last_tick = event.tick;
        }
        track.push(TrackEvent {
            delta: u28::from(0),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        });

        let mut smf = Smf::new(Header::new(
            Format::SingleTrack,
            Timing::Metrical(u15::from_int_lossy(ticks_per_beat)),
        ));
        smf.tracks.push(track);
        let mut bytes = Vec::default();
        smf.write_std(&mut bytes)?;
        Ok(bytes)
    }

    #[allow(missing_docs)]
    pub fn export(path: &Path, events: &[MidiEvent], ticks_per_beat: u16) -> anyhow::Result<()> {
        std::fs::write(path, Self::to_bytes(events, ticks_per_beat)?)?;
        log::info!("exported {} MIDI events to {}", events.len(), path.display());
        Ok(())
    }

    fn delta(ticks: u32) -> anyhow::Result<u28> {
        if ticks > u28::max_value().as_int() {
            Err(anyhow!("gap of {ticks} ticks is too long for a MIDI file"))
        } else {
            Ok(u28::from_int_lossy(ticks))
        }
    }
}
