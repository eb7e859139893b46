use serde::Deserialize;
use std::fmt;
use std::io;
use tracing::Subscriber;
use tracing_subscriber::fmt::{self as tracing_fmt, format, writer::BoxMakeWriter};
use tracing_subscriber::registry::LookupSpan;

#[cfg(test)]
use std::sync::{Arc, Mutex, OnceLock};

/// Layer type returned by the console builder.
pub type ConsoleFmtLayer<S> =
    tracing_fmt::Layer<S, format::DefaultFields, format::Format<format::Compact, ()>, BoxMakeWriter>;

/// Where console logs should be emitted.
///
/// Progress lines always go to stdout, so the default keeps diagnostics on stderr.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleOutput {
    Stdout,
    #[default]
    Stderr,
    None,
}

impl fmt::Display for ConsoleOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConsoleOutput::Stdout => "stdout",
            ConsoleOutput::Stderr => "stderr",
            ConsoleOutput::None => "none",
        };
        f.write_str(name)
    }
}

/// Build the console tracing layer for the provided subscriber type.
pub fn console_layer<S>(output: ConsoleOutput) -> ConsoleFmtLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let make_writer = captured_writer().unwrap_or_else(|| match output {
        ConsoleOutput::Stdout => BoxMakeWriter::new(io::stdout),
        ConsoleOutput::Stderr => BoxMakeWriter::new(io::stderr),
        ConsoleOutput::None => BoxMakeWriter::new(io::sink),
    });

    tracing_fmt::layer()
        .compact()
        .with_writer(make_writer)
        .with_ansi(false)
        .with_target(false)
        .without_time()
}

#[cfg(not(test))]
fn captured_writer() -> Option<BoxMakeWriter> {
    None
}

#[cfg(test)]
static CAPTURE: OnceLock<Mutex<Option<Arc<Mutex<Vec<u8>>>>>> = OnceLock::new();

#[cfg(test)]
fn captured_writer() -> Option<BoxMakeWriter> {
    let buffer = CAPTURE.get()?.lock().unwrap().clone()?;
    Some(BoxMakeWriter::new(move || CaptureWriter(buffer.clone())))
}

/// Route console output into `buffer` for layers built after this call.
#[cfg(test)]
pub fn capture_output(buffer: Arc<Mutex<Vec<u8>>>) {
    CAPTURE
        .get_or_init(|| Mutex::new(None))
        .lock()
        .unwrap()
        .replace(buffer);
}

#[cfg(test)]
struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

#[cfg(test)]
impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
