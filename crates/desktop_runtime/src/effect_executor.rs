//! Drains reducer-emitted effects into the host.

use leptos::*;

use crate::runtime_context::DesktopRuntimeContext;

/// Installs the reactive drain for [`DesktopRuntimeContext::effects`].
///
/// Effects run in emission order. The queue is emptied before the batch runs, so effects that
/// dispatch again (a timer firing synchronously, for instance) land in a fresh batch.
pub fn install(runtime: DesktopRuntimeContext) {
    create_effect(move |_| {
        if runtime.effects.with(Vec::is_empty) {
            return;
        }
        let batch = runtime
            .effects
            .try_update(std::mem::take)
            .unwrap_or_default();

        runtime.host.with_value(|host| {
            for effect in batch {
                host.run_runtime_effect(runtime, effect);
            }
        });
    });
}
