/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Headless shell for the point editor.
//!
//! Reads one command per line from stdin and applies it, standing in for a
//! windowing layer. `show` prints the current render packet.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use bpaf::Bpaf;
use log::{error, info, warn};
use tracing_subscriber::EnvFilter;

use pointgraph::app::GraphEditorApp;
use pointgraph::input::{ShellLine, intent_for_event, parse_line};
use pointgraph::prefs::{EditorPrefs, PrefsError};
use pointgraph::render::derive_render_packet;

const LOG_ENV: &str = "POINTGRAPH_LOG";

#[derive(Debug, Clone, Bpaf)]
#[bpaf(options, version)]
/// Place points, link them, undo edits. Commands on stdin:
/// click X Y | select X Y | toggle X Y | undo | clear | show | quit
struct Options {
    /// Preferences file (TOML)
    #[bpaf(long, short, argument("PATH"))]
    config: Option<PathBuf>,
    /// Distance within which a click picks a node
    #[bpaf(long, argument("RADIUS"))]
    pick_radius: Option<f32>,
    /// Log filter, e.g. `debug` or `pointgraph=trace`
    #[bpaf(long, argument("FILTER"))]
    log: Option<String>,
}

fn main() -> ExitCode {
    let opts = options().run();
    init_logging(opts.log.as_deref());

    let prefs = match load_prefs(&opts) {
        Ok(prefs) => prefs,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        },
    };
    info!(
        "pointgraph {} (pick radius {})",
        pointgraph::VERSION,
        prefs.pick_radius
    );

    match run_shell(GraphEditorApp::new(prefs), io::stdin().lock(), io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("shell I/O failed: {e}");
            ExitCode::FAILURE
        },
    }
}

fn init_logging(filter: Option<&str>) {
    let filter = filter
        .map(str::to_owned)
        .or_else(|| std::env::var(LOG_ENV).ok())
        .unwrap_or_else(|| "info".to_owned());
    let env_filter = EnvFilter::try_new(&filter).unwrap_or_else(|_| EnvFilter::new("info"));
    // Also routes `log` records through the subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .try_init();
}

fn load_prefs(opts: &Options) -> Result<EditorPrefs, PrefsError> {
    let prefs = match &opts.config {
        Some(path) => EditorPrefs::load(path)?,
        None => EditorPrefs::default(),
    };
    match opts.pick_radius {
        Some(radius) => prefs.with_pick_radius(radius),
        None => Ok(prefs),
    }
}

fn run_shell(
    mut app: GraphEditorApp,
    input: impl BufRead,
    mut output: impl Write,
) -> io::Result<()> {
    for (number, line) in input.lines().enumerate() {
        let line = line?;
        match parse_line(&line) {
            Ok(ShellLine::Event(event)) => app.apply_intent(intent_for_event(event)),
            Ok(ShellLine::Show) => write!(output, "{}", derive_render_packet(&app))?,
            Ok(ShellLine::Quit) => break,
            Ok(ShellLine::Blank) => {},
            Err(e) => warn!("line {}: {e}", number + 1),
        }
    }
    output.flush()
}
