//! # Target Codec Module
//!
//! Parametri fissi del formato di destinazione (H.264 in contenitore MP4).
//!
//! ## Responsabilità:
//! - Alias del codec riconosciuti nell'output di ffprobe (`h264`, `avc1`)
//! - Encoder, profilo, livello e pixel format passati a ffmpeg
//! - Codec e bitrate audio, preset di velocità, flag faststart del contenitore

/// Fixed description of the format conversions produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetCodec {
    /// Short name, used in output file names (`clip_h264.mp4`)
    pub name: &'static str,
    /// Codec names reported by ffprobe that already match the target
    pub aliases: &'static [&'static str],
    pub encoder: &'static str,
    pub container: &'static str,
    pub profile: &'static str,
    pub level: &'static str,
    pub pixel_format: &'static str,
    pub audio_codec: &'static str,
    pub audio_bitrate: &'static str,
    pub speed_preset: &'static str,
}

impl TargetCodec {
    pub const H264: TargetCodec = TargetCodec {
        name: "h264",
        aliases: &["h264", "avc1"],
        encoder: "libx264",
        container: "mp4",
        profile: "main",
        level: "4.0",
        pixel_format: "yuv420p",
        audio_codec: "aac",
        audio_bitrate: "192k",
        speed_preset: "medium",
    };

    /// Case-insensitive match of a probed codec name against the aliases
    pub fn matches(&self, codec_name: &str) -> bool {
        let codec_name = codec_name.trim();
        self.aliases
            .iter()
            .any(|alias| alias.eq_ignore_ascii_case(codec_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_aliases() {
        assert!(TargetCodec::H264.matches("h264"));
        assert!(TargetCodec::H264.matches("H264"));
        assert!(TargetCodec::H264.matches("AVC1"));
        assert!(!TargetCodec::H264.matches("hevc"));
        assert!(!TargetCodec::H264.matches("h265"));
        assert!(!TargetCodec::H264.matches(""));
    }
}
