//! The surface itself: construction, accessors and decode application.

use super::decode::{DecodeJob, DecodeQueue, DecodeResult, DecodeWorker};
use super::history::History;
use super::options::{SurfaceHooks, SurfaceOptions};
use super::types::{DrawingParams, StrokeState, SurfaceError};
use crate::draw::{Color, fill_background, paint_image, paint_image_scaled};
use crate::host::Document;
use crate::image::{EncodedImage, ImageSource};
use crate::ui::Layout;

/// An interactive raster drawing widget attached to a host mount point.
///
/// Owns the canvas, the undo/redo history, the pointer state machine and the
/// toolbar layout. All methods run on the caller's thread; only image decodes
/// are handed to the tokio runtime, and their results are applied by
/// [`SketchSurface::pump`] or [`SketchSurface::settle`].
pub struct SketchSurface {
    pub(super) options: SurfaceOptions,
    pub(super) hooks: SurfaceHooks,
    pub(super) canvas: cairo::ImageSurface,
    pub(super) params: DrawingParams,
    pub(super) stroke: StrokeState,
    pub(super) history: History,
    pub(super) mount_origin: (f64, f64),
    pub(super) layout: Layout,
    pub(super) slider_drag: bool,
    worker: DecodeWorker,
    queue: DecodeQueue,
}

impl SketchSurface {
    /// Creates a surface inside the mount point `mount_id` of `document`.
    ///
    /// The canvas starts filled with the background color and the history
    /// holds exactly that one snapshot.
    pub fn new(
        document: &Document,
        mount_id: &str,
        options: SurfaceOptions,
        hooks: SurfaceHooks,
        runtime: &tokio::runtime::Handle,
    ) -> Result<Self, SurfaceError> {
        let mount = document
            .mount_point(mount_id)
            .ok_or_else(|| SurfaceError::MountPointNotFound(mount_id.to_string()))?;
        let worker = DecodeWorker::new(runtime);
        Self::with_worker(mount.origin(), options, hooks, worker)
    }

    pub(super) fn with_worker(
        mount_origin: (f64, f64),
        options: SurfaceOptions,
        hooks: SurfaceHooks,
        worker: DecodeWorker,
    ) -> Result<Self, SurfaceError> {
        let options = options.sanitized();
        let canvas = blank_canvas(options.width, options.height, options.background_color)?;
        let history = History::new(EncodedImage::encode(&canvas)?);
        let layout = Layout::compute(mount_origin, options.width, options.height, &options.toolbar);

        log::info!(
            "Sketch surface created: {}x{}, line {:.0}px {}, toolbar {}",
            options.width,
            options.height,
            options.line_width,
            options.line_color.to_hex(),
            if options.toolbar.show_toolbar {
                "shown"
            } else {
                "hidden"
            }
        );

        Ok(Self {
            params: DrawingParams {
                color: options.line_color,
                width: options.line_width,
            },
            stroke: StrokeState::Idle,
            options,
            hooks,
            canvas,
            history,
            mount_origin,
            layout,
            slider_drag: false,
            worker,
            queue: DecodeQueue::default(),
        })
    }

    /// Current canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.canvas.width() as u32
    }

    /// Current canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.canvas.height() as u32
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn params(&self) -> DrawingParams {
        self.params
    }

    pub fn stroke_state(&self) -> StrokeState {
        self.stroke
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn options(&self) -> &SurfaceOptions {
        &self.options
    }

    /// The raster canvas, for compositing by the host.
    pub fn canvas(&self) -> &cairo::ImageSurface {
        &self.canvas
    }

    /// Number of decodes requested but not yet applied.
    pub fn pending_decodes(&self) -> usize {
        self.queue.pending()
    }

    pub(super) fn context(&self) -> Result<cairo::Context, SurfaceError> {
        Ok(cairo::Context::new(&self.canvas)?)
    }

    /// Encodes the canvas and appends it to the history.
    pub(super) fn commit_snapshot(&mut self) -> Result<(), SurfaceError> {
        let snapshot = EncodedImage::encode(&self.canvas)?;
        self.history.commit(snapshot);
        log::debug!(
            "Committed snapshot {} ({} in history)",
            self.history.cursor(),
            self.history.len()
        );
        Ok(())
    }

    /// Logs an error and hands it to the `on_error` hook.
    pub(super) fn report(&mut self, error: &SurfaceError) {
        log::error!("{error}");
        self.hooks.failed(error);
    }

    /// Queues an asynchronous decode of `source`.
    pub(super) fn request_decode(
        &mut self,
        source: ImageSource,
        job: DecodeJob,
    ) -> Result<(), SurfaceError> {
        let name = job.name();
        let seq = self.queue.push(job);
        log::debug!("Requesting {name} decode #{seq}");
        if let Err(e) = self.worker.submit(seq, source) {
            // Never dispatched, so it can never complete
            self.queue.complete(seq, Err(SurfaceError::DecoderUnavailable));
            self.apply_ready();
            return Err(e);
        }
        Ok(())
    }

    /// Applies every decode that has finished and whose predecessors have
    /// been applied. Never blocks.
    ///
    /// Returns the number of jobs applied.
    pub fn pump(&mut self) -> usize {
        while let Some(completion) = self.worker.try_recv() {
            self.queue.complete(completion.seq, completion.result);
        }
        self.apply_ready()
    }

    /// Blocks until every pending decode has been applied.
    ///
    /// Must not be called from inside an async context.
    /// Returns the number of jobs applied.
    pub fn settle(&mut self) -> usize {
        let mut applied = self.pump();
        while !self.queue.is_empty() {
            match self.worker.recv_blocking() {
                Some(completion) => {
                    self.queue.complete(completion.seq, completion.result);
                    applied += self.apply_ready();
                }
                None => {
                    for (seq, job) in self.queue.drain() {
                        log::error!("Decode #{seq} ({}) lost: worker stopped", job.name());
                        self.hooks.failed(&SurfaceError::DecoderUnavailable);
                        applied += 1;
                    }
                }
            }
        }
        applied
    }

    /// Settles outstanding decodes before the canvas is mutated directly, so
    /// a late restore or load never lands on top of newer pixels.
    pub(super) fn apply_pending(&mut self) {
        if self.queue.is_empty() {
            return;
        }
        log::debug!(
            "Applying {} pending decode(s) before drawing",
            self.queue.pending()
        );
        self.settle();
    }

    fn apply_ready(&mut self) -> usize {
        let mut applied = 0;
        while let Some((seq, job, result)) = self.queue.pop_ready() {
            log::debug!("Applying {} decode #{seq}", job.name());
            self.apply_decoded(job, result);
            applied += 1;
        }
        applied
    }

    fn apply_decoded(&mut self, job: DecodeJob, result: DecodeResult) {
        let image = match result.and_then(|decoded| decoded.into_surface()) {
            Ok(image) => image,
            Err(e) => {
                self.report(&e);
                return;
            }
        };

        let painted = match &job {
            DecodeJob::Restore => self.repaint(&image, false),
            DecodeJob::Load { .. } | DecodeJob::Reload => self
                .repaint(&image, true)
                .and_then(|()| self.commit_snapshot()),
        };
        if let Err(e) = painted {
            self.report(&e);
            return;
        }

        if let DecodeJob::Load {
            on_complete: Some(on_complete),
        } = job
        {
            on_complete();
        }
    }

    /// Clears to the background and paints `image`, either at native size or
    /// stretched over the whole canvas.
    fn repaint(&self, image: &cairo::ImageSurface, scaled: bool) -> Result<(), SurfaceError> {
        let ctx = self.context()?;
        fill_background(&ctx, self.options.background_color)?;
        if scaled {
            paint_image_scaled(&ctx, image, self.width() as f64, self.height() as f64)?;
        } else {
            paint_image(&ctx, image)?;
        }
        drop(ctx);
        self.canvas.flush();
        Ok(())
    }
}

/// Allocates an ARGB32 canvas filled with the background color.
pub(super) fn blank_canvas(
    width: u32,
    height: u32,
    background: Color,
) -> Result<cairo::ImageSurface, SurfaceError> {
    let (w, h) = match (i32::try_from(width), i32::try_from(height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
        _ => return Err(SurfaceError::InvalidDimensions { width, height }),
    };
    let canvas = cairo::ImageSurface::create(cairo::Format::ARgb32, w, h)?;
    {
        let ctx = cairo::Context::new(&canvas)?;
        fill_background(&ctx, background)?;
    }
    canvas.flush();
    Ok(canvas)
}

impl std::fmt::Debug for SketchSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SketchSurface")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("params", &self.params)
            .field("stroke", &self.stroke)
            .field("history_len", &self.history.len())
            .field("cursor", &self.history.cursor())
            .field("pending_decodes", &self.queue.pending())
            .finish()
    }
}
