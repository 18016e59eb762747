//! The fixed adaptive-bitrate ladder every job requests.

/// One rung of the ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenditionSpec {
    pub width: i32,
    pub height: i32,
    /// Video ceiling in bits per second.
    pub max_bitrate: i32,
    /// HRD buffer in bits.
    pub buffer_size: i32,
    pub quality_level: i32,
    pub adaptive_quantization: &'static str,
    /// Audio bitrate in bits per second.
    pub audio_bitrate: i32,
    pub aac_profile: &'static str,
}

impl RenditionSpec {
    /// e.g. `_Ott_Hls_Ts_Avc_Aac_16x9_640x360p_1.5Mbps_qvbr`
    pub fn name_modifier(&self) -> String {
        format!(
            "_Ott_Hls_Ts_Avc_Aac_16x9_{}x{}p_{:.1}Mbps_qvbr",
            self.width,
            self.height,
            f64::from(self.max_bitrate) / 1_000_000.0
        )
    }
}

pub const RENDITION_LADDER: [RenditionSpec; 5] = [
    RenditionSpec {
        width: 480,
        height: 270,
        max_bitrate: 400_000,
        buffer_size: 1_000_000,
        quality_level: 7,
        adaptive_quantization: "MEDIUM",
        audio_bitrate: 64_000,
        aac_profile: "HEV1",
    },
    RenditionSpec {
        width: 640,
        height: 360,
        max_bitrate: 1_500_000,
        buffer_size: 3_750_000,
        quality_level: 7,
        adaptive_quantization: "MEDIUM",
        audio_bitrate: 64_000,
        aac_profile: "HEV1",
    },
    RenditionSpec {
        width: 960,
        height: 540,
        max_bitrate: 3_500_000,
        buffer_size: 8_750_000,
        quality_level: 8,
        adaptive_quantization: "HIGH",
        audio_bitrate: 96_000,
        aac_profile: "HEV1",
    },
    RenditionSpec {
        width: 1280,
        height: 720,
        max_bitrate: 6_000_000,
        buffer_size: 15_000_000,
        quality_level: 8,
        adaptive_quantization: "HIGH",
        audio_bitrate: 96_000,
        aac_profile: "HEV1",
    },
    RenditionSpec {
        width: 1920,
        height: 1080,
        max_bitrate: 8_500_000,
        buffer_size: 21_250_000,
        quality_level: 9,
        adaptive_quantization: "HIGH",
        audio_bitrate: 128_000,
        aac_profile: "LC",
    },
];
