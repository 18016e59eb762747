//! Pure construction of the transcoding job request.
//!
//! Nothing here performs I/O. The same paths and metadata always produce
//! the same request, so the output can be compared field by field.

use serde::Serialize;

use super::ladder::{RENDITION_LADDER, RenditionSpec};

pub const JOB_QUEUE: &str = "Default";
pub const OUTPUT_GROUP_NAME: &str = "Apple HLS";
pub const AUDIO_SELECTOR: &str = "Audio Selector 1";
pub const SEGMENT_LENGTH_SECS: i32 = 3;
pub const GOP_SIZE_SECS: f64 = 3.0;
pub const STATUS_UPDATE_INTERVAL_SECS: u32 = 60;

/// Opaque correlation data round-tripped by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobMetadata {
    pub guid: String,
    #[serde(rename = "stackName")]
    pub stack_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccelerationMode {
    Disabled,
    Enabled,
    Preferred,
}

impl AccelerationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccelerationMode::Disabled => "DISABLED",
            AccelerationMode::Enabled => "ENABLED",
            AccelerationMode::Preferred => "PREFERRED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRequest {
    pub queue: String,
    pub role: String,
    pub renditions: Vec<RenditionOutput>,
    pub output_group: OutputGroupSpec,
    pub inputs: Vec<InputSpec>,
    pub acceleration_mode: AccelerationMode,
    pub status_update_interval_secs: u32,
    pub user_metadata: JobMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenditionOutput {
    pub name_modifier: String,
    pub container: M3u8Container,
    pub video: VideoOutput,
    pub audio: AudioOutput,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct M3u8Container {
    pub audio_frames_per_pes: i32,
    pub pcr_control: &'static str,
    pub pmt_pid: i32,
    pub private_metadata_pid: i32,
    pub program_number: i32,
    pub pat_interval: i32,
    pub pmt_interval: i32,
    pub video_pid: i32,
    pub audio_pids: Vec<i32>,
}

impl Default for M3u8Container {
    fn default() -> Self {
        Self {
            audio_frames_per_pes: 4,
            pcr_control: "PCR_EVERY_PES_PACKET",
            pmt_pid: 480,
            private_metadata_pid: 503,
            program_number: 1,
            pat_interval: 0,
            pmt_interval: 0,
            video_pid: 481,
            audio_pids: (482..=498).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoOutput {
    pub width: i32,
    pub height: i32,
    pub scaling_behavior: &'static str,
    pub timecode_insertion: &'static str,
    pub anti_alias: &'static str,
    pub sharpness: i32,
    pub afd_signaling: &'static str,
    pub drop_frame_timecode: &'static str,
    pub respond_to_afd: &'static str,
    pub color_metadata: &'static str,
    pub h264: H264Encoding,
}

/// H.264 parameters. Only bitrate, buffer, quality and adaptive
/// quantization vary across the ladder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct H264Encoding {
    pub interlace_mode: &'static str,
    pub par_numerator: i32,
    pub par_denominator: i32,
    pub par_control: &'static str,
    pub number_reference_frames: i32,
    pub syntax: &'static str,
    pub gop_closed_cadence: i32,
    pub gop_size: f64,
    pub gop_size_units: &'static str,
    pub gop_b_reference: &'static str,
    pub hrd_buffer_initial_fill_percentage: i32,
    pub hrd_buffer_size: i32,
    pub max_bitrate: i32,
    pub slices: i32,
    pub slow_pal: &'static str,
    pub spatial_adaptive_quantization: &'static str,
    pub temporal_adaptive_quantization: &'static str,
    pub flicker_adaptive_quantization: &'static str,
    pub adaptive_quantization: &'static str,
    pub entropy_encoding: &'static str,
    pub rate_control_mode: &'static str,
    pub qvbr_quality_level: i32,
    pub codec_profile: &'static str,
    pub codec_level: &'static str,
    pub telecine: &'static str,
    pub min_i_interval: i32,
    pub field_encoding: &'static str,
    pub scene_change_detect: &'static str,
    pub quality_tuning_level: &'static str,
    pub unregistered_sei_timecode: &'static str,
    pub number_b_frames_between_reference_frames: i32,
    pub repeat_pps: &'static str,
    pub dynamic_sub_gop: &'static str,
}

impl H264Encoding {
    fn for_rendition(spec: &RenditionSpec) -> Self {
        Self {
            interlace_mode: "PROGRESSIVE",
            par_numerator: 1,
            par_denominator: 1,
            par_control: "SPECIFIED",
            number_reference_frames: 3,
            syntax: "DEFAULT",
            gop_closed_cadence: 1,
            gop_size: GOP_SIZE_SECS,
            gop_size_units: "SECONDS",
            gop_b_reference: "ENABLED",
            hrd_buffer_initial_fill_percentage: 90,
            hrd_buffer_size: spec.buffer_size,
            max_bitrate: spec.max_bitrate,
            slices: 1,
            slow_pal: "DISABLED",
            spatial_adaptive_quantization: "ENABLED",
            temporal_adaptive_quantization: "ENABLED",
            flicker_adaptive_quantization: "ENABLED",
            adaptive_quantization: spec.adaptive_quantization,
            entropy_encoding: "CABAC",
            rate_control_mode: "QVBR",
            qvbr_quality_level: spec.quality_level,
            codec_profile: "HIGH",
            codec_level: "AUTO",
            telecine: "NONE",
            min_i_interval: 0,
            field_encoding: "PAFF",
            scene_change_detect: "ENABLED",
            quality_tuning_level: "SINGLE_PASS_HQ",
            unregistered_sei_timecode: "DISABLED",
            number_b_frames_between_reference_frames: 5,
            repeat_pps: "DISABLED",
            dynamic_sub_gop: "ADAPTIVE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioOutput {
    pub audio_type_control: &'static str,
    pub audio_source_name: &'static str,
    pub language_code_control: &'static str,
    pub audio_type: i32,
    pub aac: AacEncoding,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AacEncoding {
    pub audio_description_broadcaster_mix: &'static str,
    pub bitrate: i32,
    pub rate_control_mode: &'static str,
    pub codec_profile: &'static str,
    pub coding_mode: &'static str,
    pub raw_format: &'static str,
    pub sample_rate: i32,
    pub specification: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputGroupSpec {
    pub name: &'static str,
    pub destination: String,
    pub segment_length: i32,
    pub min_segment_length: i32,
    pub manifest_duration_format: &'static str,
    pub directory_structure: &'static str,
    pub output_selection: &'static str,
    pub segment_control: &'static str,
    pub codec_specification: &'static str,
    pub caption_language_setting: &'static str,
    pub client_cache: &'static str,
    pub stream_inf_resolution: &'static str,
    pub manifest_compression: &'static str,
    pub program_date_time: &'static str,
    pub program_date_time_period: i32,
    pub timed_metadata_id3_frame: &'static str,
    pub timed_metadata_id3_period: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputSpec {
    pub file_input: String,
    pub audio_selector_name: &'static str,
    pub audio_selector_offset: i32,
    pub audio_default_selection: &'static str,
    pub audio_program_selection: i32,
    pub color_space: &'static str,
    pub rotate: &'static str,
    pub alpha_behavior: &'static str,
    pub filter_enable: &'static str,
    pub filter_strength: i32,
    pub psi_control: &'static str,
    pub deblock_filter: &'static str,
    pub denoise_filter: &'static str,
    pub timecode_source: &'static str,
}

/// `s3://dest/GUID` becomes `s3://dest/GUID/AppleHLS1/`.
pub fn output_group_destination(output_path: &str) -> String {
    let group: String = OUTPUT_GROUP_NAME.split_whitespace().collect();
    format!("{}/{}{}/", output_path, group, 1)
}

pub fn build_job_request(
    input_path: &str,
    output_path: &str,
    role: &str,
    metadata: JobMetadata,
) -> JobRequest {
    JobRequest {
        queue: JOB_QUEUE.to_string(),
        role: role.to_string(),
        renditions: RENDITION_LADDER.iter().map(rendition_output).collect(),
        output_group: hls_output_group(output_path),
        inputs: vec![input_spec(input_path)],
        acceleration_mode: AccelerationMode::Preferred,
        status_update_interval_secs: STATUS_UPDATE_INTERVAL_SECS,
        user_metadata: metadata,
    }
}

fn rendition_output(spec: &RenditionSpec) -> RenditionOutput {
    RenditionOutput {
        name_modifier: spec.name_modifier(),
        container: M3u8Container::default(),
        video: VideoOutput {
            width: spec.width,
            height: spec.height,
            scaling_behavior: "DEFAULT",
            timecode_insertion: "DISABLED",
            anti_alias: "ENABLED",
            sharpness: 100,
            afd_signaling: "NONE",
            drop_frame_timecode: "ENABLED",
            respond_to_afd: "NONE",
            color_metadata: "INSERT",
            h264: H264Encoding::for_rendition(spec),
        },
        audio: AudioOutput {
            audio_type_control: "FOLLOW_INPUT",
            audio_source_name: AUDIO_SELECTOR,
            language_code_control: "FOLLOW_INPUT",
            audio_type: 0,
            aac: AacEncoding {
                audio_description_broadcaster_mix: "NORMAL",
                bitrate: spec.audio_bitrate,
                rate_control_mode: "CBR",
                codec_profile: spec.aac_profile,
                coding_mode: "CODING_MODE_2_0",
                raw_format: "NONE",
                sample_rate: 48_000,
                specification: "MPEG4",
            },
        },
    }
}

fn hls_output_group(output_path: &str) -> OutputGroupSpec {
    OutputGroupSpec {
        name: OUTPUT_GROUP_NAME,
        destination: output_group_destination(output_path),
        segment_length: SEGMENT_LENGTH_SECS,
        min_segment_length: 0,
        manifest_duration_format: "INTEGER",
        directory_structure: "SINGLE_DIRECTORY",
        output_selection: "MANIFESTS_AND_SEGMENTS",
        segment_control: "SEGMENTED_FILES",
        codec_specification: "RFC_4281",
        caption_language_setting: "OMIT",
        client_cache: "ENABLED",
        stream_inf_resolution: "INCLUDE",
        manifest_compression: "NONE",
        program_date_time: "EXCLUDE",
        program_date_time_period: 600,
        timed_metadata_id3_frame: "PRIV",
        timed_metadata_id3_period: 10,
    }
}

fn input_spec(input_path: &str) -> InputSpec {
    InputSpec {
        file_input: input_path.to_string(),
        audio_selector_name: AUDIO_SELECTOR,
        audio_selector_offset: 0,
        audio_default_selection: "DEFAULT",
        audio_program_selection: 1,
        color_space: "FOLLOW",
        rotate: "DEGREE_0",
        alpha_behavior: "DISCARD",
        filter_enable: "AUTO",
        filter_strength: 0,
        psi_control: "USE_PSI",
        deblock_filter: "DISABLED",
        denoise_filter: "DISABLED",
        timecode_source: "ZEROBASED",
    }
}
