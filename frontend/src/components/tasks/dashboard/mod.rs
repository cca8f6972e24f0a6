//! Task dashboard: every task record in the store, refreshed on a fixed
//! interval, with per-row selection and confirmed deletion.
//!
//! The component only wires Yew to `common::tasks::TaskDashboard`, which holds
//! the list, the selection and the pending deletion.

use common::tasks::dashboard::fetch_scope_names;
use gloo_timers::callback::Interval;
use yew::platform::spawn_local;
use yew::prelude::*;

mod messages;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use state::TaskDashboardComponent;

impl Component for TaskDashboardComponent {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let mut component = TaskDashboardComponent::new();
        let link = ctx.link().clone();
        let millis =
            u32::try_from(component.config.refresh_interval.as_millis()).unwrap_or(u32::MAX);
        component.refresh = Some(Interval::new(millis, move || link.send_message(Msg::Refresh)));
        component
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            ctx.link().send_message(Msg::Refresh);

            let link = ctx.link().clone();
            let api = self.api.clone();
            spawn_local(async move {
                link.send_message(Msg::ScopeNames(fetch_scope_names(&api).await));
            });
        }
    }
}
