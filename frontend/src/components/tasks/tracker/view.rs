//! View rendering for the task tracker: a run button and a progress bar.

use common::model::task::{TaskState, TaskStatus};
use yew::prelude::*;

use crate::helpers::status_label;

use super::messages::Msg;
use super::state::TaskTrackerComponent;

pub fn view(component: &TaskTrackerComponent, ctx: &Context<TaskTrackerComponent>) -> Html {
    let props = ctx.props();

    html! {
        <div class="task-tracker">
            <button
                class="btn"
                disabled={component.busy}
                onclick={ctx.link().callback(|_| Msg::Run)}
            >
                { props.label.clone() }
            </button>
            { component.status.as_ref().map(progress_bar).unwrap_or_default() }
            {
                match &component.error {
                    Some(error) => html! { <p class="task-error">{ error.clone() }</p> },
                    None => html! {},
                }
            }
        </div>
    }
}

fn progress_bar(status: &TaskStatus) -> Html {
    let percent = status.percent();
    let width = match (status.status, percent) {
        (TaskState::Done, _) => 100,
        (_, Some(percent)) => percent,
        _ => 0,
    };
    let counters = match (status.loaded, status.total) {
        (Some(loaded), Some(total)) => format!("{} / {}", loaded, total),
        _ => String::new(),
    };

    html! {
        <div class="task-progress">
            <div class="task-progress-track">
                <div
                    class={classes!("task-progress-fill", status.status.as_str())}
                    style={format!("width: {}%;", width)}
                />
            </div>
            <span class="task-progress-label">
                { status_label(status.status) }
                { " " }
                { counters }
            </span>
            {
                match &status.message {
                    Some(message) => html! {
                        <small class="task-message">{ message.clone() }</small>
                    },
                    None => html! {},
                }
            }
        </div>
    }
}
