//! Task tracker: root module wiring the Yew `Component` implementation with
//! submodules for state, update logic and view rendering.
//!
//! Responsibilities
//! - On first render, ask the store whether a task is already running for the
//!   tracker's `(scope, category)` and resume polling it.
//! - Launch the job when the operator presses the run button.
//! - Cancel the running poll when the component is destroyed.

use common::tasks::ActiveTaskResolver;
use yew::platform::spawn_local;
use yew::prelude::*;

mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::TaskTrackerProps;
pub use state::TaskTrackerComponent;

impl Component for TaskTrackerComponent {
    type Message = Msg;
    type Properties = TaskTrackerProps;

    fn create(_ctx: &Context<Self>) -> Self {
        TaskTrackerComponent::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.checked {
            self.checked = true;

            let link = ctx.link().clone();
            let api = self.api.clone();
            let scope = ctx.props().scope.to_string();
            let category = ctx.props().category.to_string();
            spawn_local(async move {
                let mut resolver = ActiveTaskResolver::new();
                let result = resolver.resolve(&api, &scope, &category).await;
                link.send_message(Msg::Resolved(result));
            });
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if let Some(cancel) = self.cancel.take() {
            cancel.cancel();
        }
    }
}
