// Copyright (c) 2024 Mike Tsao

use crate::{
    error::StructureError,
    structure::{HarmonicStructure, HasBitStructure, RhythmicStructure},
    types::{u7, MidiChannel, MidiEvent, MidiMessage},
};

/// Provides MIDI-related utility functionality.
pub struct MidiUtils {}
impl MidiUtils {
    /// Convenience function to make a note-on [MidiMessage].
    pub fn new_note_on(key: u7, vel: u7) -> MidiMessage {
        MidiMessage::NoteOn { key, vel }
    }

    /// Convenience function to make a note-off [MidiMessage].
    pub fn new_note_off(key: u7, vel: u7) -> MidiMessage {
        MidiMessage::NoteOff { key, vel }
    }

    /// Sounds every on position of `structure` as a chord: position `p` plays
    /// key `root_key + p` from `start` for `duration` ticks. Fails if any key
    /// would exceed 127.
    pub fn chord_events(
        structure: &HarmonicStructure,
        channel: MidiChannel,
        root_key: u8,
        start: u32,
        duration: u32,
        velocity: u7,
    ) -> Result<Vec<MidiEvent>, StructureError> {
        let keys = structure
            .bit_structure()
            .on_positions()
            .into_iter()
            .map(|p| {
                let key = root_key as usize + p;
                u8::try_from(key)
                    .ok()
                    .filter(|k| *k <= u7::max_value().as_int())
                    .map(u7::from_int_lossy)
                    .ok_or(StructureError::KeyOutOfRange { key })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut events = Vec::with_capacity(keys.len() * 2);
        for key in &keys {
            events.push(MidiEvent {
                tick: start,
                channel,
                message: Self::new_note_on(*key, velocity),
            });
        }
        for key in &keys {
            events.push(MidiEvent {
                tick: start.saturating_add(duration),
                channel,
                message: Self::new_note_off(*key, u7::from(0)),
            });
        }
        Self::sort_events(&mut events);
        Ok(events)
    }

    /// Plays `key` once per onset of `structure`. Tick `i` of the structure
    /// starts at `start + i * ticks_per_position`, and each note lasts one
    /// position.
    pub fn rhythm_events(
        structure: &RhythmicStructure,
        channel: MidiChannel,
        key: u7,
        start: u32,
        ticks_per_position: u32,
        velocity: u7,
    ) -> Vec<MidiEvent> {
        let mut events = Vec::default();
        for onset in structure.onsets() {
            let on = start.saturating_add((onset as u32).saturating_mul(ticks_per_position));
            events.push(MidiEvent {
                tick: on,
                channel,
                message: MidiMessage::NoteOn { key, vel: velocity },
            });
            events.push(MidiEvent {
                tick: on.saturating_add(ticks_per_position),
                channel,
                message: MidiMessage::NoteOff {
                    key,
                    vel: u7::from(0),
                },
            });
        }
        Self::sort_events(&mut events);
        events
    }

    /// Orders by tick, with note-offs ahead of note-ons at the same tick so
    /// that a repeated key retriggers rather than being cut off.
    pub fn sort_events(events: &mut [MidiEvent]) {
        events.sort_by_key(|e| {
            (
                e.tick,
                !matches!(e.message, MidiMessage::NoteOff { .. }),
            )
        });
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::{
        structure::BitStructure,
        types::{Degree, SystemCatalog},
    };

    #[test]
    fn chord_from_triad() {
        let mut catalog = SystemCatalog::default();
        let triad = HarmonicStructure::new(
            BitStructure::parse_code(catalog.harmonic(), "1,3*0,1,0,0,1,4*0").unwrap(),
        )
        .unwrap();
        let events =
            MidiUtils::chord_events(&triad, MidiChannel::default(), 60, 0, 480, u7::from(100))
                .unwrap();
        assert_eq!(events.len(), 6);
        assert_eq!(
            events[0].message,
            MidiMessage::NoteOn {
                key: u7::from(60),
                vel: u7::from(100)
            }
        );
        assert_eq!(events[2].message, MidiUtils::new_note_on(u7::from(67), u7::from(100)));
        assert!(events[3..].iter().all(|e| e.tick == 480));
        assert_eq!(events[5].message, MidiUtils::new_note_off(u7::from(67), u7::from(0)));

        assert_eq!(
            MidiUtils::chord_events(&triad, MidiChannel::default(), 121, 0, 480, u7::from(100)),
            Err(StructureError::KeyOutOfRange { key: 128 })
        );

        let loudest = MidiUtils::chord_events(
            &triad,
            MidiChannel::default(),
            120,
            0,
            480,
            u7::max_value(),
        )
        .unwrap();
        assert_eq!(
            loudest[2].message,
            MidiMessage::NoteOn {
                key: u7::from(127),
                vel: u7::from(127)
            }
        );
    }

    #[test]
    fn rhythm_from_tresillo() {
        let mut catalog = SystemCatalog::default();
        let system = catalog.system(Degree::RhythmicStructure, 8).unwrap();
        let tresillo =
            RhythmicStructure::new(BitStructure::parse_code(system, "1,0,0,1,0,0,1,0").unwrap())
                .unwrap();
        let events = MidiUtils::rhythm_events(
            &tresillo,
            MidiChannel::DRUM,
            u7::from(36),
            960,
            120,
            u7::from(90),
        );
        let ticks: Vec<_> = events.iter().map(|e| e.tick).collect();
        assert_eq!(ticks, vec![960, 1080, 1320, 1440, 1680, 1800]);
        assert!(events.iter().all(|e| e.channel == MidiChannel::DRUM));
    }

    #[test]
    fn note_off_sorts_first() {
        let mut events = vec![
            MidiEvent {
                tick: 10,
                channel: MidiChannel::default(),
                message: MidiUtils::new_note_on(u7::from(60), u7::from(1)),
            },
            MidiEvent {
                tick: 10,
                channel: MidiChannel::default(),
                message: MidiUtils::new_note_off(u7::from(60), u7::from(0)),
            },
            MidiEvent {
                tick: 0,
                channel: MidiChannel::default(),
                message: MidiUtils::new_note_on(u7::from(60), u7::from(1)),
            },
        ];
        MidiUtils::sort_events(&mut events);
        assert_eq!(events[0].tick, 0);
        assert!(matches!(events[1].message, MidiMessage::NoteOff { .. }));
    }
}
