//! Podcast Command Handlers

use futures_util::{stream, StreamExt, TryStreamExt};
use std::sync::Arc;

use crate::application::commands::podcast_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::{
    AudioChunk, AudioConcatenatorPort, PodcastAudio, SynthesisRequest, TtsEnginePort,
};
use crate::domain::script::{Segment, Speaker};
use crate::domain::VoiceCast;

/// GeneratePodcastAudio Handler - 逐段合成并拼接
///
/// 不变量:
/// - 所有校验在第一次 TTS 调用之前完成
/// - chunk i 对应 segment i，任意一段失败则整体失败
pub struct GeneratePodcastAudioHandler {
    tts_engine: Arc<dyn TtsEnginePort>,
    concatenator: Arc<dyn AudioConcatenatorPort>,
    voice_cast: VoiceCast,
    settings: SynthesisSettings,
}

impl GeneratePodcastAudioHandler {
    pub fn new(
        tts_engine: Arc<dyn TtsEnginePort>,
        concatenator: Arc<dyn AudioConcatenatorPort>,
        voice_cast: VoiceCast,
        settings: SynthesisSettings,
    ) -> Self {
        Self {
            tts_engine,
            concatenator,
            voice_cast,
            settings,
        }
    }

    pub async fn handle(
        &self,
        cmd: GeneratePodcastAudioCommand,
    ) -> Result<PodcastAudio, ApplicationError> {
        let segments = self.validate(cmd.segments)?;

        tracing::info!(
            segments = segments.len(),
            concurrency = self.settings.max_concurrency,
            format = %self.concatenator.output_format(),
            "Synthesizing podcast audio"
        );

        let chunks = self.synthesize_all(&segments).await?;
        if chunks.len() != segments.len() {
            return Err(ApplicationError::internal(format!(
                "Synthesized {} chunks for {} segments",
                chunks.len(),
                segments.len()
            )));
        }

        // 拼接是 CPU 密集操作
        let concatenator = self.concatenator.clone();
        let audio = tokio::task::spawn_blocking(move || concatenator.concat(&chunks))
            .await
            .map_err(|e| ApplicationError::internal(format!("Concatenation task failed: {}", e)))??;

        tracing::info!(
            segments = audio.segment_count,
            audio_size = audio.data.len(),
            duration_ms = ?audio.duration_ms,
            "Podcast audio ready"
        );

        Ok(audio)
    }

    /// 校验并转换输入片段
    fn validate(&self, inputs: Vec<SegmentInput>) -> Result<Vec<Segment>, ApplicationError> {
        if inputs.is_empty() {
            return Err(ApplicationError::validation(
                "No segments provided for audio generation",
            ));
        }
        if inputs.len() > self.settings.max_segments {
            return Err(ApplicationError::validation(format!(
                "Too many segments: {} (max {})",
                inputs.len(),
                self.settings.max_segments
            )));
        }

        inputs
            .into_iter()
            .enumerate()
            .map(|(index, input)| {
                let speaker: Speaker = input
                    .speaker
                    .parse()
                    .map_err(|e| ApplicationError::validation(format!("segments[{}]: {}", index, e)))?;

                let chars = input.text.trim().chars().count();
                if chars > self.settings.max_segment_chars {
                    return Err(ApplicationError::validation(format!(
                        "segments[{}]: text is too long: {} characters (max {})",
                        index, chars, self.settings.max_segment_chars
                    )));
                }

                Segment::new(speaker, input.text)
                    .map_err(|e| ApplicationError::validation(format!("segments[{}]: {}", index, e)))
            })
            .collect()
    }

    /// 按顺序合成所有片段
    ///
    /// `buffered` 保证输出顺序与输入一致，并发度为 max_concurrency
    async fn synthesize_all(&self, segments: &[Segment]) -> Result<Vec<AudioChunk>, ApplicationError> {
        let concurrency = self.settings.max_concurrency.max(1);

        let jobs: Vec<_> = segments
            .iter()
            .cloned()
            .enumerate()
            .map(|(index, segment)| {
                let voice_id = self.voice_cast.voice_for(segment.speaker).to_string();
                (index, segment, voice_id)
            })
            .collect();

        let tts_engine = self.tts_engine.clone();
        stream::iter(jobs)
            .map(move |(index, segment, voice_id)| {
                let tts_engine = tts_engine.clone();
                async move { synthesize_one(tts_engine, index, segment, voice_id).await }
            })
            .buffered(concurrency)
            .try_collect()
            .await
    }
}

async fn synthesize_one(
    tts_engine: Arc<dyn TtsEnginePort>,
    index: usize,
    segment: Segment,
    voice_id: String,
) -> Result<AudioChunk, ApplicationError> {
    let speaker = segment.speaker;
    tracing::debug!(
        index = index,
        speaker = %speaker,
        voice_id = %voice_id,
        text_len = segment.text.len(),
        "Synthesizing segment"
    );

    let response = tts_engine
        .synthesize(SynthesisRequest {
            text: segment.text,
            voice_id,
        })
        .await
        .map_err(|e| {
            tracing::error!(index = index, speaker = %speaker, error = %e, "Segment synthesis failed");
            ApplicationError::external(format!(
                "Text-to-speech failed for segment {}: {}",
                index, e
            ))
        })?;

    if response.audio_data.is_empty() {
        return Err(ApplicationError::external(format!(
            "Text-to-speech returned no audio for segment {}",
            index
        )));
    }

    Ok(AudioChunk {
        index,
        speaker,
        data: response.audio_data,
        content_type: response.content_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        AudioFormat, ConcatError, SynthesisResponse, TtsError, VoiceInfo,
    };
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    /// 把文本原样作为 "音频" 返回，可指定在第 n 次调用失败
    #[derive(Default)]
    struct EchoTts {
        fail_on_call: Option<usize>,
        requests: Mutex<Vec<SynthesisRequest>>,
    }

    impl EchoTts {
        fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TtsEnginePort for EchoTts {
        async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResponse, TtsError> {
            let call = {
                let mut requests = self.requests.lock().unwrap();
                requests.push(request.clone());
                requests.len() - 1
            };
            if self.fail_on_call == Some(call) {
                return Err(TtsError::ServiceError("HTTP 500: boom".to_string()));
            }
            // 越短的文本越晚返回，用于打乱完成顺序
            let delay = 40u64.saturating_sub(request.text.len() as u64 * 5);
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(SynthesisResponse {
                request_id: None,
                audio_data: format!("{}|{}", request.voice_id, request.text).into_bytes(),
                content_type: Some("audio/mpeg".to_string()),
            })
        }

        async fn list_voices(&self) -> Result<Vec<VoiceInfo>, TtsError> {
            Ok(vec![])
        }
    }

    /// 记录收到的 chunk 顺序，输出为 chunk 数据以 "," 连接
    #[derive(Default)]
    struct JoiningConcatenator {
        received: Mutex<Vec<usize>>,
    }

    impl AudioConcatenatorPort for JoiningConcatenator {
        fn concat(&self, chunks: &[AudioChunk]) -> Result<PodcastAudio, ConcatError> {
            if chunks.is_empty() {
                return Err(ConcatError::EmptyInput);
            }
            self.received
                .lock()
                .unwrap()
                .extend(chunks.iter().map(|c| c.index));
            let parts: Vec<String> = chunks
                .iter()
                .map(|c| String::from_utf8_lossy(&c.data).into_owned())
                .collect();
            Ok(PodcastAudio {
                data: parts.join(",").into_bytes(),
                format: AudioFormat::Mp3,
                segment_count: chunks.len(),
                duration_ms: None,
            })
        }

        fn output_format(&self) -> AudioFormat {
            AudioFormat::Mp3
        }
    }

    fn build(
        tts: Arc<EchoTts>,
        concat: Arc<JoiningConcatenator>,
        max_concurrency: usize,
    ) -> GeneratePodcastAudioHandler {
        GeneratePodcastAudioHandler::new(
            tts,
            concat,
            VoiceCast::new("F", "M"),
            SynthesisSettings {
                max_concurrency,
                max_segments: 10,
                max_segment_chars: 50,
            },
        )
    }

    fn cmd(items: &[(&str, &str)]) -> GeneratePodcastAudioCommand {
        GeneratePodcastAudioCommand {
            segments: items
                .iter()
                .map(|(speaker, text)| SegmentInput::new(*speaker, *text))
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_sequential_synthesis_preserves_order_and_voices() {
        let tts = Arc::new(EchoTts::default());
        let concat = Arc::new(JoiningConcatenator::default());
        let handler = build(tts.clone(), concat.clone(), 1);

        let audio = handler
            .handle(cmd(&[("Host", "Hi"), ("Guest", "Hello there"), ("Host", "Bye")]))
            .await
            .unwrap();

        assert_eq!(audio.segment_count, 3);
        assert_eq!(audio.data, b"F|Hi,M|Hello there,F|Bye".to_vec());
        assert_eq!(tts.calls(), 3);
        assert_eq!(*concat.received.lock().unwrap(), vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_concurrent_synthesis_preserves_order() {
        let tts = Arc::new(EchoTts::default());
        let concat = Arc::new(JoiningConcatenator::default());
        let handler = build(tts.clone(), concat.clone(), 4);

        let audio = handler
            .handle(cmd(&[
                ("Host", "a"),
                ("Guest", "bbbbbbb"),
                ("Host", "cc"),
                ("Guest", "dddd"),
                ("Host", "e"),
            ]))
            .await
            .unwrap();

        assert_eq!(audio.data, b"F|a,M|bbbbbbb,F|cc,M|dddd,F|e".to_vec());
        assert_eq!(*concat.received.lock().unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_handle_runs_on_spawned_task() {
        let tts = Arc::new(EchoTts::default());
        let concat = Arc::new(JoiningConcatenator::default());
        let handler = Arc::new(build(tts.clone(), concat, 3));

        let audio = tokio::spawn(async move {
            handler
                .handle(cmd(&[("Host", "one"), ("Guest", "two"), ("Host", "three")]))
                .await
        })
        .await
        .unwrap()
        .unwrap();

        assert_eq!(audio.data, b"F|one,M|two,F|three".to_vec());
        assert_eq!(tts.calls(), 3);
    }

    #[tokio::test]
    async fn test_empty_segments_rejected_without_calls() {
        let tts = Arc::new(EchoTts::default());
        let concat = Arc::new(JoiningConcatenator::default());
        let err = build(tts.clone(), concat, 1)
            .handle(cmd(&[]))
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::ValidationError(_)));
        assert_eq!(tts.calls(), 0);
    }

    #[tokio::test]
    async fn test_unknown_speaker_rejected_before_any_call() {
        let tts = Arc::new(EchoTts::default());
        let concat = Arc::new(JoiningConcatenator::default());
        let err = build(tts.clone(), concat, 1)
            .handle(cmd(&[("Host", "Hi"), ("Narrator", "Once upon a time")]))
            .await
            .unwrap_err();

        match err {
            ApplicationError::ValidationError(msg) => {
                assert!(msg.contains("segments[1]"));
                assert!(msg.contains("Narrator"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(tts.calls(), 0);
    }

    #[tokio::test]
    async fn test_blank_and_oversized_text_rejected() {
        let tts = Arc::new(EchoTts::default());
        let concat = Arc::new(JoiningConcatenator::default());
        let handler = build(tts.clone(), concat, 1);

        let blank = handler.handle(cmd(&[("Host", "  ")])).await.unwrap_err();
        assert!(matches!(blank, ApplicationError::ValidationError(_)));

        let long_text = "x".repeat(51);
        let long = handler
            .handle(cmd(&[("Guest", long_text.as_str())]))
            .await
            .unwrap_err();
        assert!(matches!(long, ApplicationError::ValidationError(_)));

        assert_eq!(tts.calls(), 0);
    }

    #[tokio::test]
    async fn test_too_many_segments_rejected() {
        let tts = Arc::new(EchoTts::default());
        let concat = Arc::new(JoiningConcatenator::default());
        let items: Vec<(&str, &str)> = (0..11).map(|_| ("Host", "Hi")).collect();

        let err = build(tts.clone(), concat, 1)
            .handle(cmd(&items))
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::ValidationError(_)));
        assert_eq!(tts.calls(), 0);
    }

    #[tokio::test]
    async fn test_single_provider_failure_aborts_request() {
        let tts = Arc::new(EchoTts {
            fail_on_call: Some(0),
            ..Default::default()
        });
        let concat = Arc::new(JoiningConcatenator::default());
        let err = build(tts.clone(), concat.clone(), 1)
            .handle(cmd(&[("Host", "Hi")]))
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::ExternalServiceError(_)));
        assert!(concat.received.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mid_batch_failure_returns_no_partial_audio() {
        let tts = Arc::new(EchoTts {
            fail_on_call: Some(1),
            ..Default::default()
        });
        let concat = Arc::new(JoiningConcatenator::default());
        let err = build(tts.clone(), concat.clone(), 1)
            .handle(cmd(&[("Host", "one"), ("Guest", "two"), ("Host", "three")]))
            .await
            .unwrap_err();

        match err {
            ApplicationError::ExternalServiceError(msg) => assert!(msg.contains("segment 1")),
            other => panic!("expected external service error, got {:?}", other),
        }
        // 串行模式下第二段失败后不再继续调用
        assert_eq!(tts.calls(), 2);
        assert!(concat.received.lock().unwrap().is_empty());
    }
}
