//! View rendering for the task dashboard: toolbar, task table and the
//! deletion confirm sheet.

use common::tasks::{DeletionRequest, TaskRow};
use yew::html::Scope;
use yew::prelude::*;

use crate::helpers::{format_timestamp, status_label};
use crate::tops_sheet::confirm_sheet::ConfirmSheet;

use super::messages::Msg;
use super::state::TaskDashboardComponent;

pub fn view(component: &TaskDashboardComponent, ctx: &Context<TaskDashboardComponent>) -> Html {
    let link = ctx.link();
    let dashboard = &component.dashboard;
    let pending = dashboard.pending_deletion();

    html! {
        <div class="task-dashboard">
            { build_toolbar(component, link) }
            {
                if dashboard.show_loading() {
                    match dashboard.refresh_error() {
                        Some(error) => html! {
                            <p class="task-error">
                                { format!("No se pudo cargar la lista de tareas: {}", error) }
                            </p>
                        },
                        None => html! { <p class="task-loading">{"Cargando tareas..."}</p> },
                    }
                } else if dashboard.tasks().is_empty() {
                    html! { <p class="task-empty">{"No hay tareas registradas."}</p> }
                } else {
                    build_table(&dashboard.rows(), link)
                }
            }
            <ConfirmSheet
                open={pending.is_some()}
                message={pending.map(DeletionRequest::prompt).unwrap_or_default()}
                on_confirm={link.callback(|_| Msg::ConfirmDeletion)}
                on_cancel={link.callback(|_| Msg::CancelDeletion)}
            />
        </div>
    }
}

fn build_toolbar(component: &TaskDashboardComponent, link: &Scope<TaskDashboardComponent>) -> Html {
    let dashboard = &component.dashboard;
    let nothing_selected = dashboard.selected().is_empty();
    let busy = component.deleting;

    html! {
        <div class="icon-toolbar">
            <button class="btn" disabled={busy} onclick={link.callback(|_| Msg::Refresh)}>
                {"Actualizar"}
            </button>
            <button class="btn" onclick={link.callback(|_| Msg::SelectAll)}>
                {"Seleccionar todo"}
            </button>
            <button
                class="btn"
                disabled={nothing_selected}
                onclick={link.callback(|_| Msg::ClearSelection)}
            >
                {"Quitar selección"}
            </button>
            <button
                class="btn btn-danger"
                disabled={busy || nothing_selected}
                onclick={link.callback(|_| {
                    Msg::RequestDeletion(DeletionRequest::Selected(Vec::new()))
                })}
            >
                { format!("Eliminar seleccionadas ({})", dashboard.selected().len()) }
            </button>
            <button
                class="btn btn-danger"
                disabled={busy || dashboard.tasks().is_empty()}
                onclick={link.callback(|_| Msg::RequestDeletion(DeletionRequest::All))}
            >
                {"Eliminar todas"}
            </button>
        </div>
    }
}

fn build_table(rows: &[TaskRow], link: &Scope<TaskDashboardComponent>) -> Html {
    html! {
        <table class="task-table">
            <thead>
                <tr>
                    <th></th>
                    <th>{"Proyecto"}</th>
                    <th>{"Tipo"}</th>
                    <th>{"Estado"}</th>
                    <th>{"Progreso"}</th>
                    <th>{"Detalle"}</th>
                    <th>{"Actualizada"}</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>
                { for rows.iter().map(|row| build_row(row, link)) }
            </tbody>
        </table>
    }
}

fn build_row(row: &TaskRow, link: &Scope<TaskDashboardComponent>) -> Html {
    let toggle_id = row.task_id.clone();
    let delete_id = row.task_id.clone();

    html! {
        <tr
            key={row.task_id.clone()}
            class={classes!(row.status.as_str(), row.selected.then_some("selected"))}
        >
            <td>
                <input
                    type="checkbox"
                    checked={row.selected}
                    onclick={link.callback(move |_| Msg::Toggle(toggle_id.clone()))}
                />
            </td>
            <td>{ row.scope_label.clone() }</td>
            <td>{ row.category.clone() }</td>
            <td>{ status_label(row.status) }</td>
            <td>{ row.percent.map(|p| format!("{}%", p)).unwrap_or_default() }</td>
            <td>{ row.detail.clone().unwrap_or_default() }</td>
            <td>{ format_timestamp(row.updated_at) }</td>
            <td>
                <button
                    class="icon-btn"
                    title="Eliminar"
                    onclick={link.callback(move |_| {
                        Msg::RequestDeletion(DeletionRequest::One(delete_id.clone()))
                    })}
                >
                    <i class="material-icons">{"delete"}</i>
                </button>
            </td>
        </tr>
    }
}
