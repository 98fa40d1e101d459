//! neckdraft: neck geometry solver and technical drawing renderer for
//! violin, viol and guitar family instruments.
//!
//! Given a parameter snapshot, the solver derives the neck angle, the
//! body stop / neck stop split, fingerboard thickness and string clearance;
//! the renderer turns the result into a dimensioned side view, a neck
//! cross-section and a fingerboard radius template, as SVG sized in
//! millimetres.
//!
//! # Example
//! ```no_run
//! use neckdraft::{render_drawing, solve_geometry, DrawingOptions, InstrumentParameters};
//!
//! let params = InstrumentParameters::default();
//! let derived = solve_geometry(&params).unwrap();
//! println!("Neck angle: {:.1}°", derived.neck_angle);
//! let svg = render_drawing(&params, &derived, &DrawingOptions::default());
//! ```

pub mod error;
pub mod frets;
pub mod geometry;
pub mod model;
pub mod renderer;

#[cfg(target_os = "android")]
pub mod android;

pub use error::{Error, GeometryError, Result};
pub use frets::{fret_table, FretRow, FretTable};
pub use geometry::solve_geometry;
pub use model::*;
pub use renderer::{render_cross_section, render_drawing, render_radius_template};

/// Parse a drawing request (`{"parameters": {...}, "options": {...}}`).
/// Missing fields fall back to their defaults.
pub fn parse_request(json: &str) -> Result<DrawingRequest> {
    Ok(serde_json::from_str(json)?)
}

/// Convert derived geometry to a JSON string.
/// Useful for passing data across FFI boundaries.
pub fn derived_to_json(derived: &DerivedGeometry) -> Result<String> {
    Ok(serde_json::to_string_pretty(derived)?)
}

/// Which drawing to produce from a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Side,
    CrossSection,
    RadiusTemplate,
}

/// Parse a JSON request, solve it and render the requested view to SVG.
pub fn render_json(json: &str, view: View) -> Result<String> {
    let request = parse_request(json)?;
    let params = &request.parameters;
    Ok(match view {
        View::Side => render_drawing(params, &solve_geometry(params)?, &request.options),
        View::CrossSection => {
            render_cross_section(params, &solve_geometry(params)?, &request.options)
        }
        // The template depends only on the fingerboard end.
        View::RadiusTemplate => render_radius_template(params)?,
    })
}

/// Parse a JSON request, solve it and render the side view to SVG.
pub fn render_json_to_svg(json: &str) -> Result<String> {
    render_json(json, View::Side)
}

/// Parse a JSON request and return the derived geometry as JSON.
pub fn solve_json(json: &str) -> Result<String> {
    let request = parse_request(json)?;
    derived_to_json(&solve_geometry(&request.parameters)?)
}

// ═══════════════════════════════════════════════════════════════════════
// C FFI for iOS (static library) and Android (JNI)
// ═══════════════════════════════════════════════════════════════════════

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// Run `f` on a C string argument and hand the result back as an owned C
/// string, or null on any failure.
unsafe fn ffi_call(input: *const c_char, f: impl FnOnce(&str) -> Result<String>) -> *mut c_char {
    if input.is_null() {
        return std::ptr::null_mut();
    }
    let c_str = unsafe { CStr::from_ptr(input) };
    let json = match c_str.to_str() {
        Ok(s) => s,
        Err(_) => return std::ptr::null_mut(),
    };

    match f(json) {
        Ok(out) => CString::new(out).unwrap_or_default().into_raw(),
        Err(e) => {
            log::warn!("neckdraft request failed: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Render a JSON drawing request to the side-view SVG.
/// The caller must free the returned string with `neckdraft_free_string`.
///
/// # Safety
/// `json` must be a valid null-terminated UTF-8 C string.
#[no_mangle]
pub unsafe extern "C" fn neckdraft_render_json(json: *const c_char) -> *mut c_char {
    unsafe { ffi_call(json, render_json_to_svg) }
}

/// Render a JSON drawing request to the cross-section SVG.
/// The caller must free the returned string with `neckdraft_free_string`.
///
/// # Safety
/// `json` must be a valid null-terminated UTF-8 C string.
#[no_mangle]
pub unsafe extern "C" fn neckdraft_render_cross_section_json(json: *const c_char) -> *mut c_char {
    unsafe { ffi_call(json, |s| render_json(s, View::CrossSection)) }
}

/// Render a JSON drawing request to the fingerboard radius template SVG.
/// The caller must free the returned string with `neckdraft_free_string`.
///
/// # Safety
/// `json` must be a valid null-terminated UTF-8 C string.
#[no_mangle]
pub unsafe extern "C" fn neckdraft_render_radius_template_json(json: *const c_char) -> *mut c_char {
    unsafe { ffi_call(json, |s| render_json(s, View::RadiusTemplate)) }
}

/// Solve a JSON drawing request and return the derived geometry as JSON.
/// The caller must free the returned string with `neckdraft_free_string`.
///
/// # Safety
/// `json` must be a valid null-terminated UTF-8 C string.
#[no_mangle]
pub unsafe extern "C" fn neckdraft_solve_json(json: *const c_char) -> *mut c_char {
    unsafe { ffi_call(json, solve_json) }
}

/// Free a string previously returned by neckdraft functions.
///
/// # Safety
/// `ptr` must be a string previously returned by a neckdraft function, or null.
#[no_mangle]
pub unsafe extern "C" fn neckdraft_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            let _ = CString::from_raw(ptr);
        }
    }
}
