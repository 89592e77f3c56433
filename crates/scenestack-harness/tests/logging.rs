#![forbid(unsafe_code)]

//! Navigator diagnostics rendered through a `tracing-subscriber` formatter.

use std::io;
use std::sync::{Arc, Mutex};

use scenestack_harness::{FrameDriver, PHONE, fixture};
use scenestack_nav::SceneConfig;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn text(&self) -> String {
        let bytes = self.0.lock().map(|b| b.clone()).unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(mut sink) = self.0.lock() {
            sink.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Capture {
    type Writer = Capture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn frames_and_state_changes_are_traced() {
    let capture = Capture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(capture.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let (mut nav, _focus) =
            fixture(["home", "detail"], |_: &&str| SceneConfig::push_from_right(PHONE)).unwrap();
        nav.pop().unwrap();
        FrameDriver::new().settle(&mut nav).unwrap();
    });

    let text = capture.text();
    assert!(text.contains("transition started"), "{text}");
    assert!(text.contains("navigator_frame"), "{text}");
    assert!(text.contains("transition settled"), "{text}");
    assert!(text.contains("released scenes"), "{text}");
}

#[test]
fn quiet_below_debug() {
    let capture = Capture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .with_writer(capture.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let (mut nav, _focus) =
            fixture(["home"], |_: &&str| SceneConfig::fade()).unwrap();
        nav.push("detail").unwrap();
        FrameDriver::new().settle(&mut nav).unwrap();
    });

    assert!(capture.text().is_empty(), "{}", capture.text());
}
