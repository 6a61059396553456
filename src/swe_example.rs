use crate::build_info;
use crate::config::*;
use crate::error::*;
use crate::initial_conditions::*;
use clap::Parser;
use std::path::PathBuf;

#[cfg(feature = "profile-with-puffin")]
use std::sync::Mutex;

#[cfg(feature = "profile-with-puffin")]
static PUFFIN_SERVER: Mutex<Option<puffin_http::Server>> = Mutex::new(None);

/// swforce shallow water executable
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Directory for output files, will be created.
    /// WARNING, if this Directory
    /// already exists, current contents will be removed.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Cells along x.
    #[arg(long, default_value = "256")]
    pub nx: usize,

    /// Cells along y.
    #[arg(long, default_value = "256")]
    pub ny: usize,

    #[arg(long, default_value = "1.0")]
    pub dx: f64,

    #[arg(long, default_value = "1.0")]
    pub dy: f64,

    /// Time step, must satisfy the CFL condition.
    #[arg(long, default_value = "0.05")]
    pub dt: f64,

    /// Gravitational acceleration.
    #[arg(short, long, default_value = "9.81")]
    pub g: f64,

    /// Tile width in cells.
    #[arg(long, default_value = "16")]
    pub block_width: usize,

    /// Tile height in cells.
    #[arg(long, default_value = "16")]
    pub block_height: usize,

    /// Ghost layers per tile, 1 or 2.
    #[arg(long, default_value = "1")]
    pub halo: usize,

    #[arg(long, default_value = "x-then-y")]
    pub sweep_order: SweepOrder,

    /// Depth below which velocities are taken as zero.
    #[arg(long, default_value = "1e-6")]
    pub dry_depth: f64,

    /// How many images to output.
    #[arg(short, long, default_value = "20")]
    pub images: usize,

    /// How many steps to take per image.
    #[arg(short, long, default_value = "16")]
    pub steps_per_image: usize,

    /// Write out image, WARNING: we do not check image size, so be reasonable.
    #[arg(short, long, requires("output_dir"))]
    pub write_images: bool,

    /// Write a vtk file next to each image.
    #[arg(long, requires("output_dir"))]
    pub write_vtk: bool,

    /// The number of threads to use.
    #[arg(short, long, default_value = "8")]
    pub threads: usize,

    /// Initial condition.
    #[arg(long, default_value = "dam-break")]
    pub ic: ClapICType,

    /// Free parameter of the initial condition.
    #[arg(long, default_value = "1.0")]
    pub dial: f64,

    /// Print build information and quit
    #[arg(long)]
    pub build_info: bool,
}

impl Args {
    pub fn cli_setup(name: &str) -> SweResult<Self> {
        let args = Args::parse();

        if args.build_info {
            build_info::print_report(name);
            std::process::exit(0);
        }

        log::info!("{} ({})", name, build_info::GIT_DESCRIBE);

        if let Some(output_dir) = &args.output_dir {
            let _ = std::fs::remove_dir_all(output_dir);
            std::fs::create_dir_all(output_dir)?;
        }

        #[cfg(feature = "profile-with-puffin")]
        {
            let server_addr =
                format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT);
            log::info!(
                "Run this to view profiling data:  puffin_viewer {server_addr}"
            );
            match puffin_http::Server::new(&server_addr) {
                Ok(server) => {
                    if let Ok(mut slot) = PUFFIN_SERVER.lock() {
                        *slot = Some(server);
                    }
                    profiling::puffin::set_scopes_on(true);
                }
                Err(e) => log::error!("profiling server failed: {e}"),
            }
        }

        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(args.threads)
            .thread_name(|i| format!("rayon_thread_{}", i))
            .build_global()
        {
            log::warn!("keeping existing rayon pool: {e}");
        }

        Ok(args)
    }

    pub fn step_params(&self) -> StepParams {
        StepParams {
            nx: self.nx,
            ny: self.ny,
            dx: self.dx,
            dy: self.dy,
            dt: self.dt,
            g: self.g,
        }
    }

    pub fn kernel_config(&self) -> SweResult<KernelConfig> {
        let config = KernelConfig::default()
            .with_block(self.block_width, self.block_height)
            .with_halo(HaloWidth::from_cells(self.halo)?)
            .with_dry_depth(self.dry_depth);
        config.validate()?;
        Ok(config)
    }

    pub fn ic_type(&self) -> ICType {
        self.ic.to_ic_type(self.dial)
    }

    pub fn frame_name(&self, i: usize) -> Option<PathBuf> {
        self.output_path(&format!("frame_{:04}.png", i))
    }

    pub fn vtk_name(&self, i: usize) -> Option<PathBuf> {
        self.output_path(&format!("frame_{:04}.vtu", i))
    }

    fn output_path(&self, file: &str) -> Option<PathBuf> {
        let mut result = self.output_dir.as_ref()?.clone();
        result.push(file);
        Some(result)
    }

    pub fn finish(&self) {
        #[cfg(feature = "profile-with-puffin")]
        {
            log::info!("Flushing profiler");
            if let Ok(mut slot) = PUFFIN_SERVER.lock() {
                slot.take();
            }
        }
    }
}
