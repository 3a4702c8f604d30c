use crate::buffer::FrameBuffer;
use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::objects::hit::{HitRecord, Hitable};
use crate::pool::{PoolError, WorkerPool};
use crate::scene::Scene;
use crate::{Ray, Vec3};
use image::Rgb;
use log::{debug, info, trace, warn};
use std::ops::Range;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error("rows {rows:?} failed to render")]
    Band {
        rows: Range<usize>,
        #[source]
        source: PoolError,
    },
    #[error("frame buffer of {width}x{height} is too small, both sides must be at least 2")]
    DegenerateBuffer { width: usize, height: usize },
    #[error("scene is still shared with a render pass")]
    SceneBusy,
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, RenderError>;

/// Splits `height` rows into `n` contiguous bands of `height / n` rows; the
/// last band also takes the remainder.
pub fn row_ranges(height: usize, n: usize) -> Vec<Range<usize>> {
    let chunk_size = height / n;
    (0..n)
        .map(|i| {
            let row_begin = i * chunk_size;
            let row_end = if i == n - 1 { height } else { (i + 1) * chunk_size };
            row_begin..row_end
        })
        .collect()
}

/// Ambient plus single-light diffuse term. Copied into every band task.
#[derive(Copy, Clone, Debug)]
pub struct Shading {
    pub t_min: f64,
    pub t_max: f64,
    pub ambient: f64,
    pub light_dir: Vec3,
}

impl Shading {
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            t_min: config.t_min,
            t_max: config.t_max,
            ambient: config.ambient,
            light_dir: config.light_dir.unit(),
        }
    }

    pub fn trace_ray(&self, r: &Ray, scene: &Scene) -> Vec3 {
        match scene.hit(r, self.t_min, self.t_max) {
            Some(rec) => self.lighting(&rec),
            None => background(r),
        }
    }

    fn lighting(&self, rec: &HitRecord) -> Vec3 {
        let diffuse = f64::max(0., Vec3::dot(rec.normal, self.light_dir));
        Vec3::ones() * self.ambient + rec.albedo * diffuse
    }

    /// Shades the given rows and returns them as packed RGB8 bytes.
    fn render_rows(
        &self,
        scene: &Scene,
        cam: &Camera,
        width: usize,
        height: usize,
        rows: Range<usize>,
    ) -> Vec<u8> {
        let mut band = Vec::with_capacity(rows.len() * width * 3);
        for y in rows {
            for x in 0..width {
                let u = 2.0 * x as f64 / (width - 1) as f64 - 1.0;
                let v = 1.0 - 2.0 * y as f64 / (height - 1) as f64;
                let pixel_color = self.trace_ray(&cam.get_ray(u, v), scene);
                let Rgb(px) = Rgb::from(pixel_color);
                band.extend_from_slice(&px);
            }
        }
        band
    }
}

/// White at the bottom blending into sky blue at the top.
pub fn background(r: &Ray) -> Vec3 {
    let t = 0.5 * (r.dir.y + 1.0);
    Vec3::lerp(Vec3::ones(), Vec3::new(0.5, 0.7, 1.0), t)
}

pub struct Renderer {
    pool: WorkerPool,
    shading: Shading,
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Result<Self> {
        if config.samples_per_pixel != 1 {
            warn!(
                "{} samples per pixel requested, rendering with 1",
                config.samples_per_pixel
            );
        }
        Ok(Self {
            pool: WorkerPool::new(config.threads)?,
            shading: Shading::from_config(&config),
            config,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn thread_count(&self) -> usize {
        self.pool.size()
    }

    /// Replaces the worker pool. The old pool finishes its queue first.
    pub fn set_thread_count(&mut self, threads: usize) -> Result<()> {
        let pool = WorkerPool::new(threads)?;
        info!("thread count {} -> {}", self.pool.size(), threads);
        self.pool = pool;
        self.config.threads = threads;
        Ok(())
    }

    /// Renders one frame into `buffer`, one band of rows per worker.
    ///
    /// Blocks until every band is done. The scene and camera must not change
    /// while this runs. If any band fails the buffer is left untouched.
    ///
    /// The scene is taken as an `Arc` because each band task keeps its own
    /// clone of it as a read-only snapshot for the length of the pass; the
    /// camera is copied into each task.
    pub fn render(&self, scene: &Arc<Scene>, camera: &Camera, buffer: &mut FrameBuffer) -> Result<()> {
        let start = Instant::now();
        let (width, height) = (buffer.width(), buffer.height());

        let mut pending = Vec::with_capacity(self.pool.size());
        for rows in row_ranges(height, self.pool.size()) {
            let scene = Arc::clone(scene);
            let cam = *camera;
            let shading = self.shading;
            let band_rows = rows.clone();
            trace!("queueing rows {:?}", rows);
            let handle = self
                .pool
                .submit(move || shading.render_rows(&scene, &cam, width, height, band_rows))?;
            pending.push((rows, handle));
        }
        self.pool.wait_for_all();

        let mut bands = Vec::with_capacity(pending.len());
        for (rows, handle) in pending {
            let band = handle.wait().map_err(|source| RenderError::Band {
                rows: rows.clone(),
                source,
            })?;
            bands.push((rows, band));
        }
        for (rows, band) in bands {
            buffer.rows_mut(rows).copy_from_slice(&band);
        }

        debug!(
            "rendered {}x{} frame with {} spheres in {:?}",
            width,
            height,
            scene.len(),
            start.elapsed()
        );
        Ok(())
    }
}
