//! Maps the pure [`JobRequest`] onto MediaConvert SDK shapes.
//!
//! Enumerated settings are carried as their wire strings and converted
//! with the SDK's `From<&str>` impls.

use aws_sdk_mediaconvert::types::{
    AacAudioDescriptionBroadcasterMix, AacCodecProfile, AacCodingMode, AacRateControlMode,
    AacRawFormat, AacSettings, AacSpecification, AccelerationMode, AccelerationSettings,
    AfdSignaling, AlphaBehavior, AntiAlias, AudioCodec, AudioCodecSettings, AudioDefaultSelection,
    AudioDescription, AudioLanguageCodeControl, AudioSelector, AudioTypeControl, ColorMetadata,
    ColorSpace, ContainerSettings, ContainerType, DropFrameTimecode, H264AdaptiveQuantization,
    H264CodecLevel, H264CodecProfile, H264DynamicSubGop, H264EntropyEncoding, H264FieldEncoding,
    H264FlickerAdaptiveQuantization, H264GopBReference, H264GopSizeUnits, H264InterlaceMode,
    H264ParControl, H264QualityTuningLevel, H264QvbrSettings, H264RateControlMode, H264RepeatPps,
    H264SceneChangeDetect, H264Settings, H264SlowPal, H264SpatialAdaptiveQuantization, H264Syntax,
    H264Telecine, H264TemporalAdaptiveQuantization, H264UnregisteredSeiTimecode,
    HlsCaptionLanguageSetting, HlsClientCache, HlsCodecSpecification, HlsDirectoryStructure,
    HlsGroupSettings, HlsManifestCompression, HlsManifestDurationFormat, HlsOutputSelection,
    HlsProgramDateTime, HlsSegmentControl, HlsStreamInfResolution, HlsTimedMetadataId3Frame,
    Input, InputDeblockFilter, InputDenoiseFilter, InputFilterEnable, InputPsiControl,
    InputRotate, InputTimecodeSource, JobSettings, M3u8PcrControl, M3u8Settings, Output,
    OutputGroup, OutputGroupSettings, OutputGroupType, RespondToAfd, ScalingBehavior,
    StatusUpdateInterval, VideoCodec, VideoCodecSettings, VideoDescription, VideoSelector,
    VideoTimecodeInsertion,
};

use super::EngineError;
use crate::modules::submission::request::{
    AudioOutput, H264Encoding, InputSpec, JobRequest, M3u8Container, OutputGroupSpec,
    RenditionOutput, VideoOutput,
};

pub fn job_settings(request: &JobRequest) -> JobSettings {
    let outputs = request.renditions.iter().map(output).collect();

    let group = OutputGroup::builder()
        .name(request.output_group.name)
        .set_outputs(Some(outputs))
        .output_group_settings(output_group_settings(&request.output_group))
        .build();

    JobSettings::builder()
        .output_groups(group)
        .ad_avail_offset(0)
        .set_inputs(Some(request.inputs.iter().map(input).collect()))
        .build()
}

pub fn acceleration_settings(request: &JobRequest) -> Result<AccelerationSettings, EngineError> {
    Ok(AccelerationSettings::builder()
        .mode(AccelerationMode::from(request.acceleration_mode.as_str()))
        .build())
}

pub fn status_update_interval(secs: u32) -> StatusUpdateInterval {
    StatusUpdateInterval::from(format!("SECONDS_{}", secs).as_str())
}

fn output(rendition: &RenditionOutput) -> Output {
    Output::builder()
        .name_modifier(&rendition.name_modifier)
        .container_settings(container_settings(&rendition.container))
        .video_description(video_description(&rendition.video))
        .audio_descriptions(audio_description(&rendition.audio))
        .build()
}

fn container_settings(container: &M3u8Container) -> ContainerSettings {
    let m3u8 = M3u8Settings::builder()
        .audio_frames_per_pes(container.audio_frames_per_pes)
        .pcr_control(M3u8PcrControl::from(container.pcr_control))
        .pmt_pid(container.pmt_pid)
        .private_metadata_pid(container.private_metadata_pid)
        .program_number(container.program_number)
        .pat_interval(container.pat_interval)
        .pmt_interval(container.pmt_interval)
        .video_pid(container.video_pid)
        .set_audio_pids(Some(container.audio_pids.clone()))
        .build();

    ContainerSettings::builder()
        .container(ContainerType::from("M3U8"))
        .m3u8_settings(m3u8)
        .build()
}

fn video_description(video: &VideoOutput) -> VideoDescription {
    let codec = VideoCodecSettings::builder()
        .codec(VideoCodec::from("H_264"))
        .h264_settings(h264_settings(&video.h264))
        .build();

    VideoDescription::builder()
        .width(video.width)
        .height(video.height)
        .scaling_behavior(ScalingBehavior::from(video.scaling_behavior))
        .timecode_insertion(VideoTimecodeInsertion::from(video.timecode_insertion))
        .anti_alias(AntiAlias::from(video.anti_alias))
        .sharpness(video.sharpness)
        .afd_signaling(AfdSignaling::from(video.afd_signaling))
        .drop_frame_timecode(DropFrameTimecode::from(video.drop_frame_timecode))
        .respond_to_afd(RespondToAfd::from(video.respond_to_afd))
        .color_metadata(ColorMetadata::from(video.color_metadata))
        .codec_settings(codec)
        .build()
}

fn h264_settings(h264: &H264Encoding) -> H264Settings {
    H264Settings::builder()
        .interlace_mode(H264InterlaceMode::from(h264.interlace_mode))
        .par_numerator(h264.par_numerator)
        .par_denominator(h264.par_denominator)
        .par_control(H264ParControl::from(h264.par_control))
        .number_reference_frames(h264.number_reference_frames)
        .syntax(H264Syntax::from(h264.syntax))
        .gop_closed_cadence(h264.gop_closed_cadence)
        .gop_size(h264.gop_size)
        .gop_size_units(H264GopSizeUnits::from(h264.gop_size_units))
        .gop_b_reference(H264GopBReference::from(h264.gop_b_reference))
        .hrd_buffer_initial_fill_percentage(h264.hrd_buffer_initial_fill_percentage)
        .hrd_buffer_size(h264.hrd_buffer_size)
        .max_bitrate(h264.max_bitrate)
        .slices(h264.slices)
        .slow_pal(H264SlowPal::from(h264.slow_pal))
        .spatial_adaptive_quantization(H264SpatialAdaptiveQuantization::from(
            h264.spatial_adaptive_quantization,
        ))
        .temporal_adaptive_quantization(H264TemporalAdaptiveQuantization::from(
            h264.temporal_adaptive_quantization,
        ))
        .flicker_adaptive_quantization(H264FlickerAdaptiveQuantization::from(
            h264.flicker_adaptive_quantization,
        ))
        .adaptive_quantization(H264AdaptiveQuantization::from(h264.adaptive_quantization))
        .entropy_encoding(H264EntropyEncoding::from(h264.entropy_encoding))
        .rate_control_mode(H264RateControlMode::from(h264.rate_control_mode))
        .qvbr_settings(
            H264QvbrSettings::builder()
                .qvbr_quality_level(h264.qvbr_quality_level)
                .build(),
        )
        .codec_profile(H264CodecProfile::from(h264.codec_profile))
        .codec_level(H264CodecLevel::from(h264.codec_level))
        .telecine(H264Telecine::from(h264.telecine))
        .min_i_interval(h264.min_i_interval)
        .field_encoding(H264FieldEncoding::from(h264.field_encoding))
        .scene_change_detect(H264SceneChangeDetect::from(h264.scene_change_detect))
        .quality_tuning_level(H264QualityTuningLevel::from(h264.quality_tuning_level))
        .unregistered_sei_timecode(H264UnregisteredSeiTimecode::from(
            h264.unregistered_sei_timecode,
        ))
        .number_b_frames_between_reference_frames(h264.number_b_frames_between_reference_frames)
        .repeat_pps(H264RepeatPps::from(h264.repeat_pps))
        .dynamic_sub_gop(H264DynamicSubGop::from(h264.dynamic_sub_gop))
        .build()
}

fn audio_description(audio: &AudioOutput) -> AudioDescription {
    let aac = AacSettings::builder()
        .audio_description_broadcaster_mix(AacAudioDescriptionBroadcasterMix::from(
            audio.aac.audio_description_broadcaster_mix,
        ))
        .bitrate(audio.aac.bitrate)
        .rate_control_mode(AacRateControlMode::from(audio.aac.rate_control_mode))
        .codec_profile(AacCodecProfile::from(audio.aac.codec_profile))
        .coding_mode(AacCodingMode::from(audio.aac.coding_mode))
        .raw_format(AacRawFormat::from(audio.aac.raw_format))
        .sample_rate(audio.aac.sample_rate)
        .specification(AacSpecification::from(audio.aac.specification))
        .build();

    AudioDescription::builder()
        .audio_type_control(AudioTypeControl::from(audio.audio_type_control))
        .audio_source_name(audio.audio_source_name)
        .language_code_control(AudioLanguageCodeControl::from(audio.language_code_control))
        .audio_type(audio.audio_type)
        .codec_settings(
            AudioCodecSettings::builder()
                .codec(AudioCodec::from("AAC"))
                .aac_settings(aac)
                .build(),
        )
        .build()
}

fn output_group_settings(group: &OutputGroupSpec) -> OutputGroupSettings {
    let hls = HlsGroupSettings::builder()
        .destination(&group.destination)
        .segment_length(group.segment_length)
        .min_segment_length(group.min_segment_length)
        .manifest_duration_format(HlsManifestDurationFormat::from(group.manifest_duration_format))
        .directory_structure(HlsDirectoryStructure::from(group.directory_structure))
        .output_selection(HlsOutputSelection::from(group.output_selection))
        .segment_control(HlsSegmentControl::from(group.segment_control))
        .codec_specification(HlsCodecSpecification::from(group.codec_specification))
        .caption_language_setting(HlsCaptionLanguageSetting::from(group.caption_language_setting))
        .client_cache(HlsClientCache::from(group.client_cache))
        .stream_inf_resolution(HlsStreamInfResolution::from(group.stream_inf_resolution))
        .manifest_compression(HlsManifestCompression::from(group.manifest_compression))
        .program_date_time(HlsProgramDateTime::from(group.program_date_time))
        .program_date_time_period(group.program_date_time_period)
        .timed_metadata_id3_frame(HlsTimedMetadataId3Frame::from(group.timed_metadata_id3_frame))
        .timed_metadata_id3_period(group.timed_metadata_id3_period)
        .build();

    OutputGroupSettings::builder()
        .r#type(OutputGroupType::from("HLS_GROUP_SETTINGS"))
        .hls_group_settings(hls)
        .build()
}

fn input(spec: &InputSpec) -> Input {
    let audio_selector = AudioSelector::builder()
        .offset(spec.audio_selector_offset)
        .default_selection(AudioDefaultSelection::from(spec.audio_default_selection))
        .program_selection(spec.audio_program_selection)
        .build();

    let video_selector = VideoSelector::builder()
        .color_space(ColorSpace::from(spec.color_space))
        .rotate(InputRotate::from(spec.rotate))
        .alpha_behavior(AlphaBehavior::from(spec.alpha_behavior))
        .build();

    Input::builder()
        .file_input(&spec.file_input)
        .audio_selectors(spec.audio_selector_name, audio_selector)
        .video_selector(video_selector)
        .filter_enable(InputFilterEnable::from(spec.filter_enable))
        .filter_strength(spec.filter_strength)
        .psi_control(InputPsiControl::from(spec.psi_control))
        .deblock_filter(InputDeblockFilter::from(spec.deblock_filter))
        .denoise_filter(InputDenoiseFilter::from(spec.denoise_filter))
        .timecode_source(InputTimecodeSource::from(spec.timecode_source))
        .build()
}
