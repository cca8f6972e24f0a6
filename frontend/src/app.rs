use crate::components::tasks::dashboard::TaskDashboardComponent;
use crate::components::tasks::tracker::TaskTrackerComponent;
use common::model::task::{categories, GLOBAL_SCOPE};
use web_sys::UrlSearchParams;
use yew::{html, Component, Context, Html};

/// Console layout: the job launchers on top, the task dashboard below.
///
/// The project launcher only shows when the page is opened with `?scope=<id>`.
pub struct App {
    scope: Option<String>,
}

impl Component for App {
    type Message = ();
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            scope: scope_from_location(),
        }
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <div class="console-root">
                <section class="task-launchers">
                    <TaskTrackerComponent
                        scope={GLOBAL_SCOPE}
                        category={categories::SYNC_ADMINS_BULK}
                        label="Sincronizar administradores"
                    />
                    {
                        match &self.scope {
                            Some(scope) => html! {
                                <TaskTrackerComponent
                                    scope={scope.clone()}
                                    category={categories::REFRESH_SUBSCRIBERS}
                                    label="Actualizar suscriptores"
                                />
                            },
                            None => html! {},
                        }
                    }
                </section>
                <TaskDashboardComponent />
            </div>
        }
    }
}

fn scope_from_location() -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    let scope = UrlSearchParams::new_with_str(&search).ok()?.get("scope")?;
    let scope = scope.trim();
    (!scope.is_empty()).then(|| scope.to_string())
}
