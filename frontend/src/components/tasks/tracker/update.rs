//! Update function for the task tracker component.
//!
//! Resolving on mount and the run button both end in `start_polling`, which
//! owns the only running poll of the component. Starting a new poll cancels
//! the previous one.

use common::tasks::{cancel_pair, ActiveTaskResolver, Attachment, Poller, TaskError};
use gloo_console::{error, log};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::GlooTimer;
use crate::helpers::show_toast;

use super::messages::Msg;
use super::state::TaskTrackerComponent;

/// Central update function for the component.
///
/// Returns `true` to re-render the view.
pub fn update(
    component: &mut TaskTrackerComponent,
    ctx: &Context<TaskTrackerComponent>,
    msg: Msg,
) -> bool {
    match msg {
        Msg::Resolved(Ok(Some(task_id))) => {
            log!(format!("Reanudando tarea {}", task_id));
            start_polling(component, ctx, task_id);
            true
        }
        Msg::Resolved(Ok(None)) => false,
        Msg::Resolved(Err(err)) => {
            error!(format!("No se pudo consultar las tareas activas: {}", err));
            component.error = Some(err.to_string());
            show_toast("No se pudo consultar las tareas en curso.");
            true
        }
        Msg::Run => {
            if component.busy {
                return false;
            }
            component.busy = true;
            component.error = None;
            component.status = None;

            let props = ctx.props();
            let api = component.api.clone();
            let scope = props.scope.to_string();
            let category = props.category.to_string();
            let params = props.params.clone();
            let link = ctx.link().clone();
            // A fresh resolver: another tab may have started the job since mount.
            spawn_local(async move {
                let result = ActiveTaskResolver::new()
                    .attach_or_launch(&api, &scope, &category, params)
                    .await;
                link.send_message(Msg::Launched(result));
            });
            true
        }
        Msg::Launched(Ok(attachment)) => {
            if let Attachment::Resumed(task_id) = &attachment {
                show_toast(&format!("La tarea {} ya estaba en curso.", task_id));
            }
            start_polling(component, ctx, attachment.task_id().to_string());
            true
        }
        Msg::Launched(Err(err)) => {
            component.busy = false;
            component.error = Some(err.to_string());
            show_toast("Error al iniciar la tarea.");
            true
        }
        Msg::Progress(status) => {
            if component.task_id.as_deref() != Some(status.task_id.as_str()) {
                return false;
            }
            component.status = Some(status);
            true
        }
        // Only a poll this component replaced or tore down is cancelled.
        Msg::Finished(_, Err(TaskError::Cancelled)) => false,
        Msg::Finished(task_id, result) => {
            if component.task_id.as_deref() != Some(task_id.as_str()) {
                return false;
            }
            component.busy = false;
            component.cancel = None;
            match result {
                Ok(status) => {
                    component.status = Some(status);
                    show_toast("Tarea completada.");
                }
                Err(err) => {
                    error!(format!("Tarea {} terminada con error: {}", task_id, err));
                    component.error = Some(err.to_string());
                    show_toast("La tarea terminó con errores.");
                }
            }
            true
        }
    }
}

fn start_polling(
    component: &mut TaskTrackerComponent,
    ctx: &Context<TaskTrackerComponent>,
    task_id: String,
) {
    if let Some(previous) = component.cancel.take() {
        previous.cancel();
    }
    let (cancel, signal) = cancel_pair();
    component.cancel = Some(cancel);
    component.task_id = Some(task_id.clone());
    component.busy = true;

    let poller = Poller::new(component.api.clone(), GlooTimer, component.config.poll_interval);
    let link = ctx.link().clone();
    spawn_local(async move {
        let progress = link.clone();
        let result = poller
            .poll(&task_id, signal, move |status| {
                progress.send_message(Msg::Progress(status.clone()))
            })
            .await;
        link.send_message(Msg::Finished(task_id, result));
    });
}
