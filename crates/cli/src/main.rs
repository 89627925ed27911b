//! CLI viewer for multi-project slideshow documents.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use slideshow_core::{
    document, BackgroundScope, BackgroundSlot, Command, NavigationController, NavigationPolicy,
    ResourceResolver, SlideView, ViewFormatter, ViewerOptions,
};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Step through the projects and slides of a slideshow document.
#[derive(Parser, Debug)]
#[command(name = "slideshow")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Slideshow document (JSON)
    input: PathBuf,

    /// Project to show, by slug (default: first project)
    #[arg(short = 'P', long)]
    project: Option<String>,

    /// Starting slide index, zero-based (clamped to the project)
    #[arg(short, long, allow_hyphen_values = true)]
    slide: Option<i64>,

    /// Single-project mode: bounded navigation, plural image keys only
    #[arg(long)]
    single: bool,

    /// Behaviour at the first/last slide of a project
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// Whether project backgrounds stand in for missing slide backgrounds
    #[arg(long, value_enum)]
    background_scope: Option<ScopeArg>,

    /// Read the singular `imagen`/`image` keys when the plural ones are missing
    #[arg(long)]
    image_synonyms: Option<bool>,

    /// Viewer options file (JSON); flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Comma-separated keys to replay (e.g. "n,n,ArrowLeft")
    #[arg(short, long, value_delimiter = ',')]
    keys: Vec<String>,

    /// Read one key per line from stdin; `q` quits
    #[arg(short, long)]
    interactive: bool,

    /// List the projects and exit
    #[arg(short, long)]
    list: bool,

    /// Print views as JSON lines
    #[arg(long)]
    json: bool,

    /// Only show backgrounds whose file exists next to the document
    #[arg(long)]
    check_files: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    Looping,
    Bounded,
}

impl From<PolicyArg> for NavigationPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Looping => NavigationPolicy::Looping,
            PolicyArg::Bounded => NavigationPolicy::Bounded,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScopeArg {
    SlideOnly,
    SlideThenProject,
}

impl From<ScopeArg> for BackgroundScope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::SlideOnly => BackgroundScope::SlideOnly,
            ScopeArg::SlideThenProject => BackgroundScope::SlideThenProject,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let options = load_options(&args)?;

    // A failed load never reaches normalization.
    let raw = document::from_path(&args.input)
        .with_context(|| format!("Error cargando {}", args.input.display()))?;
    let projects = options.normalizer().normalize(&raw);

    if args.list {
        for project in &projects {
            println!(
                "{}\t{}\t{} slides",
                project.slug,
                project.heading(),
                project.slide_count()
            );
        }
        return Ok(());
    }

    let mut nav = NavigationController::new(projects, options.policy)
        .with_context(|| format!("Error cargando {}", args.input.display()))?
        .with_labels(options.labels.clone());
    nav.select(args.project.as_deref(), args.slide);

    let base_dir = args
        .input
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let mut viewer = Viewer {
        nav,
        resolver: options.resolver(),
        slot: BackgroundSlot::new(),
        formatter: ViewFormatter::new(),
        base_dir,
        check_files: args.check_files,
        json: args.json,
    };

    viewer.render()?;

    for key in &args.keys {
        viewer.handle_key(key)?;
    }

    if args.interactive {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line.context("Failed to read from stdin")?;
            let key = line.trim();
            if key == "q" || key == "quit" {
                break;
            }
            viewer.handle_key(key)?;
        }
    }

    Ok(())
}

/// Merge the options file (if any), the `--single` preset and
/// command-line overrides, in that order.
fn load_options(args: &Args) -> Result<ViewerOptions> {
    let mut options = match &args.config {
        Some(path) => ViewerOptions::from_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ViewerOptions::new(),
    };

    if args.single {
        let preset = ViewerOptions::single_project();
        options = options
            .with_policy(preset.policy)
            .with_image_synonyms(preset.image_synonyms);
    }

    if let Some(policy) = args.policy {
        options = options.with_policy(policy.into());
    }
    if let Some(scope) = args.background_scope {
        options = options.with_background_scope(scope.into());
    }
    if let Some(accept) = args.image_synonyms {
        options = options.with_image_synonyms(accept);
    }

    log::debug!("Viewer options: {:?}", options);
    Ok(options)
}

/// Navigation plus the presentation side of a session.
struct Viewer {
    nav: NavigationController,
    resolver: ResourceResolver,
    slot: BackgroundSlot,
    formatter: ViewFormatter,
    base_dir: PathBuf,
    check_files: bool,
    json: bool,
}

impl Viewer {
    fn handle_key(&mut self, key: &str) -> Result<()> {
        let Some(command) = Command::from_key(key) else {
            log::warn!("Unknown key: {:?}", key);
            return Ok(());
        };

        if self.nav.apply(command) {
            self.render()?;
        } else {
            log::debug!("{:?} ignored at {:?}", command, self.nav.position());
        }
        Ok(())
    }

    /// Validate the background for the current slide and print the view.
    fn render(&mut self) -> Result<()> {
        let candidate = self
            .resolver
            .resolve_background(self.nav.current_slide(), Some(self.nav.current_project()));

        if let Some(request) = self.slot.request(self.nav.generation(), candidate) {
            let loaded = !self.check_files || self.base_dir.join(&request.url).is_file();
            self.slot.complete(&request, loaded);
        }

        let view = SlideView::capture(
            &self.nav,
            &self.resolver,
            self.slot.applied().map(str::to_string),
        );

        let mut stdout = io::stdout().lock();
        if self.json {
            let line = serde_json::to_string(&view).context("Failed to serialize view")?;
            writeln!(stdout, "{}", line)?;
        } else {
            writeln!(stdout, "{}", self.formatter.format_with_newline(&view))?;
        }
        Ok(())
    }
}
