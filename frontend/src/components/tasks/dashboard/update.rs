//! Update function for the task dashboard component.

use common::tasks::dashboard::{execute_deletion, fetch_tasks};
use common::tasks::TaskError;
use gloo_console::{error, warn};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::GlooTimer;
use crate::helpers::show_toast;

use super::messages::Msg;
use super::state::TaskDashboardComponent;

pub fn update(
    component: &mut TaskDashboardComponent,
    ctx: &Context<TaskDashboardComponent>,
    msg: Msg,
) -> bool {
    match msg {
        Msg::Refresh => {
            // A list read while deleting could bring back records already gone.
            if component.deleting || !component.dashboard.begin_refresh() {
                return false;
            }
            let api = component.api.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                link.send_message(Msg::Listed(fetch_tasks(&api).await));
            });
            false
        }
        Msg::Listed(result) => {
            let was_failing = component.dashboard.refresh_error().is_some();
            if let Err(err) = component.dashboard.finish_refresh(result) {
                error!(format!("No se pudo cargar la lista de tareas: {}", err));
                // One toast per outage, not one per tick.
                if !was_failing {
                    show_toast("No se pudo cargar la lista de tareas.");
                }
            }
            true
        }
        Msg::ScopeNames(Ok(names)) => {
            component.dashboard.set_scope_names(names);
            true
        }
        Msg::ScopeNames(Err(err)) => {
            warn!(format!("Sin nombres de proyecto: {}", err));
            false
        }
        Msg::Toggle(task_id) => {
            component.dashboard.toggle(&task_id);
            true
        }
        Msg::SelectAll => {
            component.dashboard.select_all();
            true
        }
        Msg::ClearSelection => {
            component.dashboard.clear_selection();
            true
        }
        Msg::RequestDeletion(request) => {
            if component.deleting {
                return false;
            }
            if component.dashboard.request_deletion(request).is_none() {
                show_toast("No hay tareas seleccionadas.");
                return false;
            }
            true
        }
        Msg::CancelDeletion => {
            component.dashboard.cancel_deletion();
            true
        }
        Msg::ConfirmDeletion => {
            let Some(request) = component.dashboard.take_confirmed() else {
                return false;
            };
            component.deleting = true;

            let api = component.api.clone();
            let config = component.config;
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = execute_deletion(&api, &GlooTimer, &config, &request).await;
                link.send_message(Msg::Deleted(result));
            });
            true
        }
        Msg::Deleted(result) => {
            component.deleting = false;
            match result {
                Ok(outcome) => {
                    let message = match outcome.deleted {
                        Some(count) => format!("{} tarea(s) eliminada(s).", count),
                        None => "Todas las tareas fueron eliminadas.".to_string(),
                    };
                    show_toast(&message);
                    if !outcome.confirmed {
                        warn!("La lista aún muestra tareas eliminadas.");
                    }
                    component.dashboard.finish_deletion(outcome);
                }
                Err(err) => {
                    if let TaskError::Deletion { deleted, .. } = &err {
                        show_toast(&format!(
                            "Error al eliminar. {} tarea(s) eliminada(s) antes del fallo.",
                            deleted
                        ));
                    } else {
                        show_toast("Error al eliminar las tareas.");
                    }
                    error!(err.to_string());
                }
            }
            true
        }
    }
}
