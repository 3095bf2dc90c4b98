//! Output formatter tests.

use cutscan::{format_timecode, render, DetectionResult, OutputFormat, SceneInfo, VideoMetadata};

fn sample_result() -> DetectionResult {
    let scenes = [0u64, 50]
        .iter()
        .map(|&frame_number| {
            let timestamp = frame_number as f64 / 24.0;
            SceneInfo {
                frame_number,
                timestamp,
                timecode: format_timecode(timestamp),
            }
        })
        .collect();

    DetectionResult {
        scenes,
        metadata: VideoMetadata {
            width: 1920,
            height: 1080,
            frames_per_second: 24.0,
            frame_count: 100,
            duration_seconds: 100.0 / 24.0,
            codec: "h264".to_string(),
        },
    }
}

#[test]
fn timecode_formatting() {
    assert_eq!(format_timecode(0.0), "00:00:00.000");
    assert_eq!(format_timecode(50.0 / 24.0), "00:00:02.083");
    assert_eq!(format_timecode(59.9996), "00:01:00.000");
    assert_eq!(format_timecode(3661.5), "01:01:01.500");
    // Negative timestamps clamp rather than underflow.
    assert_eq!(format_timecode(-1.0), "00:00:00.000");
}

#[test]
fn aegisub_output() {
    let rendered = render(&sample_result(), OutputFormat::Aegisub).unwrap();
    assert_eq!(rendered, "# keyframe format v1\nfps 24\n0\n50\n");
}

#[test]
fn aegisub_fractional_fps() {
    let mut result = sample_result();
    result.metadata.frames_per_second = 23.976;
    let rendered = render(&result, OutputFormat::Aegisub).unwrap();
    assert!(rendered.starts_with("# keyframe format v1\nfps 23.976\n"));
}

#[test]
fn timecode_output() {
    let rendered = render(&sample_result(), OutputFormat::Timecode).unwrap();
    assert_eq!(rendered, "00:00:00.000\n00:00:02.083\n");
}

#[test]
fn csv_output() {
    let rendered = render(&sample_result(), OutputFormat::Csv).unwrap();
    assert_eq!(
        rendered,
        "frame,timestamp,timecode\n\
         0,0.000000,00:00:00.000\n\
         50,2.083333,00:00:02.083\n",
    );
}

#[test]
fn json_output_round_trips() {
    let rendered = render(&sample_result(), OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

    let scenes = value["scenes"].as_array().unwrap();
    assert_eq!(scenes.len(), 2);
    assert_eq!(scenes[1]["frame_number"], 50);
    assert_eq!(scenes[1]["timecode"], "00:00:02.083");

    assert_eq!(value["metadata"]["width"], 1920);
    assert_eq!(value["metadata"]["frame_count"], 100);
    assert_eq!(value["metadata"]["codec"], "h264");
}

#[test]
fn format_names_parse() {
    assert_eq!(OutputFormat::from_name("json"), Some(OutputFormat::Json));
    assert_eq!(OutputFormat::from_name("Aegisub"), Some(OutputFormat::Aegisub));
    assert_eq!(OutputFormat::from_name("timecode"), Some(OutputFormat::Timecode));
    assert_eq!(OutputFormat::from_name("yaml"), None);
}
