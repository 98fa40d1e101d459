//! JNI bindings for Android.
//!
//! These functions are called from Kotlin via the JNI bridge.

use jni::objects::{JClass, JString};
use jni::sys::jstring;
use jni::JNIEnv;

use crate::{render_json, solve_json, View};

/// Read the Kotlin string argument, run `f` on it and return the result as a
/// Java string, or null on failure.
fn call_with_json(
    env: &mut JNIEnv,
    json: &JString,
    f: impl FnOnce(&str) -> crate::Result<String>,
) -> jstring {
    let json: String = match env.get_string(json) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };

    match f(&json) {
        Ok(out) => match env.new_string(&out) {
            Ok(js) => js.into_raw(),
            Err(_) => std::ptr::null_mut(),
        },
        Err(e) => {
            log::warn!("neckdraft request failed: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Render a JSON drawing request to the side-view SVG.
///
/// Called from Kotlin as:
///   external fun renderJson(json: String): String?
#[no_mangle]
pub extern "system" fn Java_com_neckdraft_app_NeckDraft_renderJson(
    mut env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    call_with_json(&mut env, &json, |s| render_json(s, View::Side))
}

/// Render a JSON drawing request to the neck cross-section SVG.
///
/// Called from Kotlin as:
///   external fun renderCrossSectionJson(json: String): String?
#[no_mangle]
pub extern "system" fn Java_com_neckdraft_app_NeckDraft_renderCrossSectionJson(
    mut env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    call_with_json(&mut env, &json, |s| render_json(s, View::CrossSection))
}

/// Render a JSON drawing request to the fingerboard radius template SVG.
///
/// Called from Kotlin as:
///   external fun renderRadiusTemplateJson(json: String): String?
#[no_mangle]
pub extern "system" fn Java_com_neckdraft_app_NeckDraft_renderRadiusTemplateJson(
    mut env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    call_with_json(&mut env, &json, |s| render_json(s, View::RadiusTemplate))
}

/// Solve a JSON drawing request and return the derived geometry as JSON.
///
/// Called from Kotlin as:
///   external fun solveJson(json: String): String?
#[no_mangle]
pub extern "system" fn Java_com_neckdraft_app_NeckDraft_solveJson(
    mut env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    call_with_json(&mut env, &json, solve_json)
}
