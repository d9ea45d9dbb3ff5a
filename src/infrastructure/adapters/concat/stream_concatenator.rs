//! Stream Concatenator - 基于 symphonia / hound 的音频拼接器
//!
//! 支持：
//! - MP3 帧级拼接（去除 ID3 标签，不重新编码）
//! - 任意可解码输入 → 16 位 PCM WAV（统一采样率与声道）

use std::io::Cursor;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::{
    AudioChunk, AudioConcatenatorPort, AudioFormat, ConcatError, PodcastAudio,
};

const ID3V2_HEADER_LEN: usize = 10;
const ID3V1_TAG_LEN: usize = 128;

/// Layer III 比特率表（kbps），按 MPEG-1 / MPEG-2 与 2.5 区分
const MPEG1_L3_BITRATES: [u32; 15] = [
    0, 32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320,
];
const MPEG2_L3_BITRATES: [u32; 15] = [
    0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160,
];
const MPEG1_SAMPLE_RATES: [u32; 3] = [44_100, 48_000, 32_000];

/// 音频拼接器
pub struct StreamConcatenator {
    format: AudioFormat,
}

impl StreamConcatenator {
    pub fn new(format: AudioFormat) -> Self {
        Self { format }
    }
}

impl Default for StreamConcatenator {
    fn default() -> Self {
        Self::new(AudioFormat::default())
    }
}

/// 跳过开头的 ID3v2 标签
fn strip_id3v2(data: &[u8]) -> &[u8] {
    if data.len() < ID3V2_HEADER_LEN || &data[..3] != b"ID3" {
        return data;
    }
    // 标签大小为 syncsafe 整数（每字节 7 位）
    let size = data[6..10]
        .iter()
        .fold(0usize, |acc, b| (acc << 7) | (*b & 0x7F) as usize);
    let has_footer = data[5] & 0x10 != 0;
    let total = ID3V2_HEADER_LEN + size + if has_footer { ID3V2_HEADER_LEN } else { 0 };
    data.get(total..).unwrap_or(&[])
}

/// 去掉结尾的 ID3v1 标签
fn strip_id3v1(data: &[u8]) -> &[u8] {
    if data.len() >= ID3V1_TAG_LEN && &data[data.len() - ID3V1_TAG_LEN..][..3] == b"TAG" {
        &data[..data.len() - ID3V1_TAG_LEN]
    } else {
        data
    }
}

/// 查找第一个 MPEG 帧同步字（11 位全 1）
fn find_frame_sync(data: &[u8]) -> Option<usize> {
    data.windows(2)
        .position(|w| w[0] == 0xFF && w[1] & 0xE0 == 0xE0)
}

/// 由帧头计算 Layer III 帧长度，非 Layer III 或保留值返回 None
fn mp3_frame_len(header: &[u8]) -> Option<usize> {
    if header.len() < 4 || header[0] != 0xFF || header[1] & 0xE0 != 0xE0 {
        return None;
    }
    let version = (header[1] >> 3) & 0x03;
    let layer = (header[1] >> 1) & 0x03;
    let bitrate_idx = (header[2] >> 4) as usize;
    let rate_idx = ((header[2] >> 2) & 0x03) as usize;
    let padding = ((header[2] >> 1) & 0x01) as u32;

    if version == 0b01 || layer != 0b01 || bitrate_idx == 0 || bitrate_idx == 15 || rate_idx == 3 {
        return None;
    }

    let (bitrate_kbps, sample_rate, coefficient) = match version {
        0b11 => (MPEG1_L3_BITRATES[bitrate_idx], MPEG1_SAMPLE_RATES[rate_idx], 144),
        0b10 => (MPEG2_L3_BITRATES[bitrate_idx], MPEG1_SAMPLE_RATES[rate_idx] / 2, 72),
        _ => (MPEG2_L3_BITRATES[bitrate_idx], MPEG1_SAMPLE_RATES[rate_idx] / 4, 72),
    };
    Some((coefficient * bitrate_kbps * 1000 / sample_rate + padding) as usize)
}

/// 判断帧是否为 Xing / Info / VBRI 元数据帧（不含音频）
fn is_vbr_info_frame(frame: &[u8]) -> bool {
    if frame.len() < 4 {
        return false;
    }
    let mpeg1 = (frame[1] >> 3) & 0x03 == 0b11;
    let mono = frame[3] >> 6 == 0b11;
    let crc = if frame[1] & 0x01 == 0 { 2 } else { 0 };
    let side_info = match (mpeg1, mono) {
        (true, false) => 32,
        (true, true) | (false, false) => 17,
        (false, true) => 9,
    };

    let tag_at = |offset: usize| frame.get(offset..offset + 4);
    matches!(tag_at(4 + crc + side_info), Some(b"Xing") | Some(b"Info"))
        || matches!(tag_at(4 + 32), Some(b"VBRI"))
}

/// 取出单个 MP3 片段中的纯帧数据
///
/// 开头的 Xing / Info / VBRI 帧只描述本片段，拼接时丢弃
fn mp3_frames(chunk: &AudioChunk) -> Result<&[u8], ConcatError> {
    let body = strip_id3v1(strip_id3v2(&chunk.data));
    let start = find_frame_sync(body).ok_or_else(|| ConcatError::InvalidInput {
        index: chunk.index,
        reason: "no MPEG frame sync found".to_string(),
    })?;
    let frames = &body[start..];

    match mp3_frame_len(frames) {
        Some(len) if len <= frames.len() && is_vbr_info_frame(&frames[..len]) => {
            tracing::debug!(index = chunk.index, "Dropping VBR info frame");
            Ok(&frames[len..])
        }
        _ => Ok(frames),
    }
}

fn concat_mp3(chunks: &[AudioChunk]) -> Result<Vec<u8>, ConcatError> {
    let frames = chunks
        .iter()
        .map(mp3_frames)
        .collect::<Result<Vec<_>, _>>()?;

    let mut output = Vec::with_capacity(frames.iter().map(|f| f.len()).sum());
    for f in frames {
        output.extend_from_slice(f);
    }
    Ok(output)
}

#[derive(Debug)]
struct DecodedAudio {
    /// 交错排列的 f32 样本
    samples: Vec<f32>,
    sample_rate: u32,
    channels: u16,
}

impl DecodedAudio {
    fn frame_count(&self) -> usize {
        if self.channels == 0 {
            0
        } else {
            self.samples.len() / self.channels as usize
        }
    }

    fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        self.frame_count() as u64 * 1000 / self.sample_rate as u64
    }
}

fn probe_hint(chunk: &AudioChunk) -> Hint {
    let mut hint = Hint::new();
    if let Some(content_type) = &chunk.content_type {
        hint.mime_type(content_type);
    }
    if chunk.data.starts_with(b"RIFF") {
        hint.with_extension("wav");
    } else {
        hint.with_extension("mp3");
    }
    hint
}

/// 使用 symphonia 解码单个片段为 PCM
fn decode_chunk(chunk: &AudioChunk) -> Result<DecodedAudio, ConcatError> {
    let decoding_error = |reason: String| ConcatError::DecodingError {
        index: chunk.index,
        reason,
    };

    let cursor = Cursor::new(chunk.data.clone());
    let mss = MediaSourceStream::new(Box::new(cursor), Default::default());

    let probed = symphonia::default::get_probe()
        .format(
            &probe_hint(chunk),
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| decoding_error(format!("Probe failed: {}", e)))?;

    let mut format = probed.format;

    let track = format
        .default_track()
        .ok_or_else(|| decoding_error("No audio track found".to_string()))?;
    let track_id = track.id;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| decoding_error(format!("Decoder creation failed: {}", e)))?;

    // MP3 的采样率和声道数可能要在第一帧解码后才知道
    let mut sample_rate = track.codec_params.sample_rate.unwrap_or(0);
    let mut channels = track
        .codec_params
        .channels
        .map(|c| c.count() as u16)
        .unwrap_or(0);
    let mut samples: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(decoding_error(format!("Packet read error: {}", e))),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(index = chunk.index, error = %e, "Failed to decode packet");
                return Err(decoding_error(format!("Decode failed: {}", e)));
            }
        };

        let spec = *decoded.spec();
        sample_rate = spec.rate;
        channels = spec.channels.count() as u16;

        let num_frames = decoded.frames();
        let mut sample_buf = SampleBuffer::<f32>::new(num_frames as u64, spec);
        sample_buf.copy_interleaved_ref(decoded);
        samples.extend(&sample_buf.samples()[..num_frames * channels as usize]);
    }

    if sample_rate == 0 || channels == 0 {
        return Err(decoding_error("Unknown sample rate or channel layout".to_string()));
    }
    if samples.is_empty() {
        return Err(decoding_error("No audio samples decoded".to_string()));
    }

    Ok(DecodedAudio {
        samples,
        sample_rate,
        channels,
    })
}

/// 简单线性重采样
fn resample(samples: &[f32], from_rate: u32, to_rate: u32, channels: u16) -> Vec<f32> {
    if from_rate == to_rate || samples.is_empty() {
        return samples.to_vec();
    }

    let ratio = to_rate as f64 / from_rate as f64;
    let channel_count = channels as usize;
    let frame_count = samples.len() / channel_count;
    let new_frame_count = (frame_count as f64 * ratio) as usize;
    let mut resampled = Vec::with_capacity(new_frame_count * channel_count);

    for i in 0..new_frame_count {
        let src_pos = i as f64 / ratio;
        let src_idx = src_pos as usize;
        let frac = (src_pos - src_idx as f64) as f32;

        for ch in 0..channel_count {
            let idx0 = src_idx * channel_count + ch;
            let idx1 = (src_idx + 1).min(frame_count - 1) * channel_count + ch;

            let s0 = samples.get(idx0).copied().unwrap_or(0.0);
            let s1 = samples.get(idx1).copied().unwrap_or(s0);
            resampled.push(s0 + (s1 - s0) * frac);
        }
    }

    resampled
}

/// 声道转换：多声道 → 单声道取平均，其余按声道序号映射
fn remix(samples: &[f32], from: u16, to: u16) -> Vec<f32> {
    if from == to {
        return samples.to_vec();
    }
    let from = from as usize;
    let to = to as usize;

    samples
        .chunks(from)
        .flat_map(|frame| {
            let mono = frame.iter().sum::<f32>() / frame.len() as f32;
            (0..to).map(move |ch| {
                if to == 1 {
                    mono
                } else {
                    frame.get(ch).copied().unwrap_or(frame[0])
                }
            })
        })
        .collect()
}

/// 将 PCM f32 样本编码为 16 位 WAV
fn encode_wav(pcm: &DecodedAudio) -> Result<Vec<u8>, ConcatError> {
    let spec = hound::WavSpec {
        channels: pcm.channels,
        sample_rate: pcm.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut output = Vec::with_capacity(44 + pcm.samples.len() * 2);
    {
        let mut writer = hound::WavWriter::new(Cursor::new(&mut output), spec)
            .map_err(|e| ConcatError::EncodingError(e.to_string()))?;
        for &s in &pcm.samples {
            let value = (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
            writer
                .write_sample(value)
                .map_err(|e| ConcatError::EncodingError(e.to_string()))?;
        }
        writer
            .finalize()
            .map_err(|e| ConcatError::EncodingError(e.to_string()))?;
    }
    Ok(output)
}

fn concat_wav(chunks: &[AudioChunk]) -> Result<(Vec<u8>, u64), ConcatError> {
    let mut merged: Option<DecodedAudio> = None;

    for chunk in chunks {
        let decoded = decode_chunk(chunk)?;
        match merged.as_mut() {
            None => merged = Some(decoded),
            Some(target) => {
                // 以第一个片段的采样率与声道为准
                let remixed = remix(&decoded.samples, decoded.channels, target.channels);
                let resampled = resample(
                    &remixed,
                    decoded.sample_rate,
                    target.sample_rate,
                    target.channels,
                );
                target.samples.extend(resampled);
            }
        }
    }

    let merged = merged.ok_or(ConcatError::EmptyInput)?;
    let duration_ms = merged.duration_ms();
    let wav = encode_wav(&merged)?;

    tracing::debug!(
        sample_rate = merged.sample_rate,
        channels = merged.channels,
        duration_ms = duration_ms,
        "Encoded concatenated WAV"
    );

    Ok((wav, duration_ms))
}

impl AudioConcatenatorPort for StreamConcatenator {
    fn concat(&self, chunks: &[AudioChunk]) -> Result<PodcastAudio, ConcatError> {
        if chunks.is_empty() {
            return Err(ConcatError::EmptyInput);
        }

        let (data, duration_ms) = match self.format {
            AudioFormat::Mp3 => (concat_mp3(chunks)?, None),
            AudioFormat::Wav => {
                let (data, duration_ms) = concat_wav(chunks)?;
                (data, Some(duration_ms))
            }
        };

        tracing::info!(
            format = %self.format,
            segments = chunks.len(),
            size = data.len(),
            duration_ms = ?duration_ms,
            "Audio concatenated"
        );

        Ok(PodcastAudio {
            data,
            format: self.format,
            segment_count: chunks.len(),
            duration_ms,
        })
    }

    fn output_format(&self) -> AudioFormat {
        self.format
    }
}
