//! The remote method catalogue.

use std::fmt;

use crate::shape::ResultShape;

macro_rules! methods {
    ($($variant:ident => $wire:literal, $shape:ident;)*) => {
        /// A method exposed by the Pianoteq JSON-RPC server.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Method {
            $(
                #[doc = concat!("`", $wire, "`")]
                $variant,
            )*
        }

        impl Method {
            /// Every method, in catalogue order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// Wire name.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)*
                }
            }

            /// Result shape the server uses for this method.
            #[must_use]
            pub const fn shape(self) -> ResultShape {
                match self {
                    $(Self::$variant => ResultShape::$shape,)*
                }
            }
        }
    };
}

methods! {
    GetInfo => "getInfo", Singleton;
    GetPerfInfo => "getPerfInfo", Singleton;
    List => "list", List;
    GetListOfPresets => "getListOfPresets", List;
    LoadPreset => "loadPreset", Discard;
    SavePreset => "savePreset", Discard;
    DeletePreset => "deletePreset", Discard;
    ResetPreset => "resetPreset", Discard;
    NextPreset => "nextPreset", Discard;
    PrevPreset => "prevPreset", Discard;
    NextFavouritePreset => "nextFavouritePreset", Discard;
    PrevFavouritePreset => "prevFavouritePreset", Discard;
    NextInstrument => "nextInstrument", Discard;
    PrevInstrument => "prevInstrument", Discard;
    AbSwitch => "abSwitch", Discard;
    AbCopy => "abCopy", Discard;
    Undo => "undo", Discard;
    Redo => "redo", Discard;
    GetParameters => "getParameters", List;
    SetParameters => "setParameters", Discard;
    RandomizeParameters => "randomizeParameters", Discard;
    LoadMidiFile => "loadMidiFile", Discard;
    SaveMidiFile => "saveMidiFile", Discard;
    MidiSend => "midiSend", Discard;
    MidiPlay => "midiPlay", Discard;
    MidiStop => "midiStop", Discard;
    MidiPause => "midiPause", Discard;
    MidiRewind => "midiRewind", Discard;
    MidiRecord => "midiRecord", Discard;
    MidiSeek => "midiSeek", Discard;
    Panic => "panic", Discard;
    Mute => "mute", Discard;
    GetSequencerInfo => "getSequencerInfo", Singleton;
    GetMetronome => "getMetronome", Singleton;
    SetMetronome => "setMetronome", Discard;
    LoadFile => "loadFile", Discard;
    GetAudioDeviceInfo => "getAudioDeviceInfo", Object;
    GetListOfAudioDevices => "getListOfAudioDevices", List;
    Activate => "activate", Discard;
    GetActivationInfo => "getActivationInfo", Singleton;
    Quit => "quit", Discard;
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
