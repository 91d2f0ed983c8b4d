use std::{
    io::{self, Write},
    path::PathBuf,
    thread,
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use typereveal::{
    DEFAULT_SPEED_MS, EngineTimer, RevealFrame, RevealSink, Scene, SceneEvent, ScenePlayer,
    SceneSink, TimeMs, TypewriterEngine, TypewriterOptions, VirtualClock,
};

#[derive(Parser, Debug)]
#[command(name = "typereveal", version)]
struct Cli {
    /// Log engine and playback transitions to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a scene JSON in virtual time and print every frame.
    Play(PlayArgs),
    /// Type a single string.
    Type(TypeArgs),
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Stop at this time instead of the scene duration.
    #[arg(long)]
    until: Option<u64>,

    /// Print JSON lines instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct TypeArgs {
    /// Text to reveal.
    #[arg(long)]
    text: String,

    /// Milliseconds between characters. Negative values clamp to zero.
    #[arg(long, default_value_t = DEFAULT_SPEED_MS as i64, allow_hyphen_values = true)]
    speed: i64,

    /// Milliseconds before the first character. Negative values clamp to zero.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    delay: i64,

    /// Cursor glyph.
    #[arg(long)]
    cursor: Option<String>,

    /// Hide the cursor.
    #[arg(long)]
    no_cursor: bool,

    /// Keep running (and blinking) until this time instead of stopping on completion.
    #[arg(long)]
    until: Option<u64>,

    /// Animate in place against the wall clock.
    #[arg(long)]
    live: bool,

    /// Print JSON lines instead of text.
    #[arg(long, conflicts_with = "live")]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Play(args) => cmd_play(args),
        Command::Type(args) => cmd_type(args),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("TYPEREVEAL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let scene = Scene::from_path(&args.in_path)
        .with_context(|| format!("load scene '{}'", args.in_path.display()))?;
    let mut player = ScenePlayer::new(&scene).context("prepare scene")?;

    let mut out = Lines::new(io::stdout().lock());
    let mut sink = PlayOut {
        out: &mut out,
        json: args.json,
    };
    match args.until {
        Some(ms) => {
            player.advance_to(TimeMs(ms), &mut sink);
            player.finish();
        }
        None => player.run(&mut sink),
    }

    out.finish().context("write playback output")
}

fn cmd_type(args: TypeArgs) -> anyhow::Result<()> {
    let mut options = TypewriterOptions::new(args.text)
        .speed(args.speed)
        .start_delay(args.delay)
        .show_cursor(!args.no_cursor);
    if let Some(glyph) = args.cursor {
        options = options.cursor_char(glyph);
    }

    let mut out = Lines::new(io::stdout().lock());
    let mut sink = TypeOut {
        out: &mut out,
        mode: if args.live {
            TypeMode::Live
        } else if args.json {
            TypeMode::Json
        } else {
            TypeMode::Text
        },
        last: None,
    };

    let mut clock: VirtualClock<EngineTimer> = VirtualClock::new();
    let mut engine = TypewriterEngine::new(options);
    engine.mount(&mut clock, &mut sink);

    let limit = args.until.map(TimeMs);
    loop {
        if limit.is_none() && engine.is_complete() {
            break;
        }
        let Some(next) = clock.next_deadline() else {
            break;
        };
        if let Some(limit) = limit
            && next > limit
        {
            clock.settle(limit);
            break;
        }
        if args.live {
            thread::sleep(Duration::from_millis(next.since(clock.now())));
        }
        while let Some(fired) = clock.pop_due(next) {
            engine.on_timer(fired.handle, fired.payload, &mut clock, &mut sink);
        }
    }
    engine.teardown(&mut clock);

    if args.live {
        out.write(|w| writeln!(w));
    }
    out.finish().context("write typewriter output")
}

/// Line writer that keeps the first I/O error instead of panicking inside a sink callback.
struct Lines<W: Write> {
    w: W,
    err: Option<io::Error>,
}

impl<W: Write> Lines<W> {
    fn new(w: W) -> Self {
        Self { w, err: None }
    }

    fn write(&mut self, f: impl FnOnce(&mut W) -> io::Result<()>) {
        if self.err.is_some() {
            return;
        }
        if let Err(e) = f(&mut self.w) {
            self.err = Some(e);
        }
    }

    fn finish(mut self) -> io::Result<()> {
        if let Some(e) = self.err.take() {
            return Err(e);
        }
        self.w.flush()
    }
}

struct PlayOut<'a, W: Write> {
    out: &'a mut Lines<W>,
    json: bool,
}

impl<W: Write> PlayOut<'_, W> {
    fn emit(&mut self, event: SceneEvent) {
        if self.json {
            self.out.write(|w| {
                serde_json::to_writer(&mut *w, &event)?;
                writeln!(w)
            });
            return;
        }
        self.out.write(|w| match &event {
            SceneEvent::Frame { region, frame } => writeln!(
                w,
                "{:>8}  {region:<12} {}",
                frame.at.to_string(),
                frame.display
            ),
            SceneEvent::Visible { region, at } => {
                writeln!(w, "{:>8}  {region:<12} (visible)", at.to_string())
            }
            SceneEvent::Complete { region, at } => {
                writeln!(w, "{:>8}  {region:<12} (complete)", at.to_string())
            }
        });
    }
}

impl<W: Write> SceneSink for PlayOut<'_, W> {
    fn frame(&mut self, region: &str, frame: &RevealFrame) {
        self.emit(SceneEvent::Frame {
            region: region.to_owned(),
            frame: frame.clone(),
        });
    }

    fn complete(&mut self, region: &str, at: TimeMs) {
        self.emit(SceneEvent::Complete {
            region: region.to_owned(),
            at,
        });
    }

    fn visible(&mut self, region: &str, at: TimeMs) {
        self.emit(SceneEvent::Visible {
            region: region.to_owned(),
            at,
        });
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TypeMode {
    Text,
    Json,
    Live,
}

struct TypeOut<'a, W: Write> {
    out: &'a mut Lines<W>,
    mode: TypeMode,
    last: Option<String>,
}

impl<W: Write> RevealSink for TypeOut<'_, W> {
    fn render(&mut self, frame: &RevealFrame) {
        match self.mode {
            TypeMode::Json => self.out.write(|w| {
                serde_json::to_writer(&mut *w, frame)?;
                writeln!(w)
            }),
            TypeMode::Live => self.out.write(|w| {
                write!(w, "\r\x1b[2K{}", frame.display)?;
                w.flush()
            }),
            TypeMode::Text => {
                // Snapshot changes only; blink frames are skipped.
                if self.last.as_deref() == Some(frame.snapshot.as_str()) {
                    return;
                }
                self.last = Some(frame.snapshot.clone());
                self.out.write(|w| {
                    writeln!(w, "{:>8}  {}", frame.at.to_string(), frame.display)
                });
            }
        }
    }

    fn complete(&mut self, at: TimeMs) {
        if self.mode == TypeMode::Json {
            self.out.write(|w| {
                serde_json::to_writer(&mut *w, &serde_json::json!({ "event": "complete", "at": at }))?;
                writeln!(w)
            });
        }
    }
}
