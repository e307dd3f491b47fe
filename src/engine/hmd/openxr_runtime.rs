//! OpenXR runtime and HMD discovery.
//!
//! Loads the loader, negotiates extensions, creates an instance, and
//! queries the HMD system. Creating a rendering session additionally
//! requires a graphics binding, which this crate keeps behind the
//! `SceneRenderer` seam; discovery reports the parameters the session
//! driven through that seam should use.

use openxr as xr;
use tracing::info;

use crate::engine::{EngineError, EngineResult};

const VIEW_TYPE: xr::ViewConfigurationType = xr::ViewConfigurationType::PRIMARY_STEREO;

/// HMD properties discovered via OpenXR.
#[derive(Debug, Clone)]
pub struct HmdInfo {
    pub system_name: String,
    pub vendor_id: u32,
    pub orientation_tracking: bool,
    pub position_tracking: bool,
    pub recommended_width: u32,
    pub recommended_height: u32,
}

/// Try to reach an OpenXR runtime and an attached HMD.
///
/// Returns `Ok(None)` when the loader or HMD is absent (graceful
/// degradation to the simulated session); `Err` only for unexpected
/// runtime failures.
pub fn discover() -> EngineResult<Option<HmdInfo>> {
    let entry = match unsafe { xr::Entry::load() } {
        Ok(entry) => entry,
        Err(e) => {
            info!("OpenXR loader not available: {e}");
            return Ok(None);
        }
    };

    let available = entry
        .enumerate_extensions()
        .map_err(|e| EngineError::Device(e.to_string()))?;

    let mut extensions = xr::ExtensionSet::default();
    extensions.mnd_headless = available.mnd_headless;

    let instance = entry
        .create_instance(
            &xr::ApplicationInfo {
                application_name: "little-room",
                application_version: 0,
                engine_name: "little-room",
                engine_version: 0,
                api_version: xr::Version::new(1, 0, 0),
            },
            &extensions,
            &[],
        )
        .map_err(|e| EngineError::Device(e.to_string()))?;

    if let Ok(props) = instance.properties() {
        info!(
            "OpenXR runtime: {} v{}",
            props.runtime_name, props.runtime_version
        );
    }

    let system = match instance.system(xr::FormFactor::HEAD_MOUNTED_DISPLAY) {
        Ok(system) => system,
        Err(xr::sys::Result::ERROR_FORM_FACTOR_UNAVAILABLE) => {
            info!("no HMD connected");
            return Ok(None);
        }
        Err(e) => return Err(EngineError::Device(e.to_string())),
    };

    let props = instance
        .system_properties(system)
        .map_err(|e| EngineError::Device(e.to_string()))?;

    let views = instance
        .enumerate_view_configuration_views(system, VIEW_TYPE)
        .map_err(|e| EngineError::Device(e.to_string()))?;
    let (recommended_width, recommended_height) = views
        .first()
        .map(|v| {
            (
                v.recommended_image_rect_width,
                v.recommended_image_rect_height,
            )
        })
        .unwrap_or((1344, 1600));

    let hmd = HmdInfo {
        system_name: props.system_name.clone(),
        vendor_id: props.vendor_id,
        orientation_tracking: props.tracking_properties.orientation_tracking,
        position_tracking: props.tracking_properties.position_tracking,
        recommended_width,
        recommended_height,
    };

    info!(
        "HMD: {} (vendor {}), {}x{} per eye, tracking: orient={} pos={}",
        hmd.system_name,
        hmd.vendor_id,
        hmd.recommended_width,
        hmd.recommended_height,
        hmd.orientation_tracking,
        hmd.position_tracking,
    );

    Ok(Some(hmd))
}
