use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};

use crate::capture::image::{SUPPORTED_EXTENSIONS, SourceImage};
use crate::capture::qr::QrEngine;
use super::args::{RunArgs, USAGE};
use crate::config::AppConfig;
use crate::recognition::engine::DecodingEngine;
use crate::recognition::worker::Recognizer;
use crate::session::messages::{Effect, Msg};
use crate::session::state::Session;

pub(crate) fn run() -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    runtime.block_on(run_session())
}

/// How the driver talks to the user
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Frontend {
    /// Native dialogs
    Dialogs,
    /// Image given on the command line; report on stdout
    Headless,
}

pub struct App {
    pub config: AppConfig,
    pub session: Session,
    recognizer: Recognizer,
    frontend: Frontend,
    /// Where the annotated image is written on redraw
    overlay_path: Option<PathBuf>,
}

impl App {
    fn new(config: AppConfig, engine: Arc<dyn DecodingEngine>, frontend: Frontend) -> Self {
        log::info!(
            "Using {} engine, supported symbologies: {}",
            engine.name(),
            engine.supported_symbologies().names().join(", ")
        );
        let session = Session::new(&config, engine.supported_symbologies());
        Self {
            config,
            session,
            recognizer: Recognizer::new(engine),
            frontend,
            overlay_path: None,
        }
    }

    /// Feed messages through the session, performing each effect it asks for
    async fn dispatch(&mut self, initial: Vec<Msg>) -> anyhow::Result<()> {
        let mut queue: VecDeque<Msg> = initial.into();
        while let Some(msg) = queue.pop_front() {
            let Some(effect) = self.session.update(msg) else {
                continue;
            };
            match effect {
                Effect::LoadImage(path) => {
                    let overlay_path = overlay_path_for(&path);
                    let loaded = tokio::task::spawn_blocking(move || SourceImage::open(path))
                        .await
                        .context("image loading task failed")?;
                    if loaded.is_ok() {
                        self.overlay_path = Some(overlay_path);
                    }
                    queue.push_front(Msg::Loaded(loaded));
                }
                Effect::StartRecognition { image, request } => {
                    let result = match self.recognizer.start(image, request) {
                        Ok(mut handle) => tokio::select! {
                            result = handle.wait() => result,
                            Ok(()) = tokio::signal::ctrl_c() => {
                                log::warn!("Interrupted, cancelling recognition");
                                handle.cancel();
                                handle.wait().await
                            }
                        },
                        Err(err) => Err(err),
                    };
                    queue.push_front(Msg::Recognized(result));
                }
                Effect::Redraw => self.redraw()?,
                Effect::Notify(text) => self.notify(&text),
            }
        }
        Ok(())
    }

    fn redraw(&self) -> anyhow::Result<()> {
        if self.session.results.is_none() {
            return Ok(());
        }
        let (Some(path), Some(annotated)) = (&self.overlay_path, self.session.render_view())
        else {
            return Ok(());
        };
        annotated
            .save(path)
            .with_context(|| format!("failed to write overlay image {}", path.display()))?;
        log::info!("Overlay written to {}", path.display());
        Ok(())
    }

    fn notify(&self, text: &str) {
        match self.frontend {
            Frontend::Dialogs => {
                MessageDialog::new()
                    .set_title("barscope")
                    .set_description(text)
                    .set_level(MessageLevel::Warning)
                    .set_buttons(MessageButtons::Ok)
                    .show();
            }
            Frontend::Headless => eprintln!("{text}"),
        }
    }

    /// Show the status log, like the results window of a desktop app
    fn show_status(&self) {
        let text = self.session.status.text();
        match self.frontend {
            Frontend::Dialogs => {
                MessageDialog::new()
                    .set_title("Barcode results")
                    .set_description(&text)
                    .set_level(MessageLevel::Info)
                    .set_buttons(MessageButtons::Ok)
                    .show();
            }
            Frontend::Headless => {
                for line in self.session.status.lines() {
                    println!("{line}");
                }
            }
        }
    }

    fn persist(&mut self, image_path: &Path) {
        self.config.store_options(&self.session.options);
        self.config.show_bounding_rects = self.session.view.visibility.bounding_rects;
        self.config.show_bounding_boxes = self.session.view.visibility.bounding_boxes;
        self.config.shrink_to_fit = self.session.view.shrink_to_fit;
        if let Some(dir) = image_path.parent() {
            self.config.last_directory = Some(dir.to_path_buf());
        }
        self.config.save();
    }
}

/// `scan.png` -> `scan-barcodes.png` in the same directory
fn overlay_path_for(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    path.with_file_name(format!("{stem}-barcodes.png"))
}

fn pick_image(config: &AppConfig) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Open Image")
        .add_filter("Images", SUPPORTED_EXTENSIONS);
    if let Some(dir) = config.last_directory.as_ref().filter(|d| d.is_dir()) {
        dialog = dialog.set_directory(dir);
    }
    dialog.pick_file()
}

/// Options first, then the image, then anything that filters the image
fn run_messages(args: &RunArgs, session: &Session, path: PathBuf) -> anyhow::Result<Vec<Msg>> {
    let mut msgs = args
        .option_messages(session)
        .context("invalid command line options")?;
    msgs.push(Msg::Open(path));
    msgs.extend(args.image_messages());
    msgs.push(Msg::Recognize);
    Ok(msgs)
}

async fn run_session() -> anyhow::Result<()> {
    let args = RunArgs::parse(std::env::args().skip(1)).context("invalid command line")?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }

    let config = AppConfig::load();
    let frontend = if args.image.is_some() {
        Frontend::Headless
    } else {
        Frontend::Dialogs
    };

    let engine: Arc<dyn DecodingEngine> = Arc::new(QrEngine::default());
    let mut app = App::new(config, engine, frontend);

    let Some(path) = args.image.clone().or_else(|| pick_image(&app.config)) else {
        log::info!("No image selected, exiting");
        return Ok(());
    };

    let msgs = run_messages(&args, &app.session, path.clone())?;
    app.dispatch(msgs).await?;
    app.show_status();
    app.persist(&path);
    Ok(())
}
