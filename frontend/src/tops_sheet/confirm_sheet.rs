//! Top sheet asking the operator to confirm a destructive action.
//!
//! The sheet slides in from the top when `open` is set. Nothing is executed
//! here: the parent decides what `on_confirm` does.

use uuid::Uuid;
use web_sys::MouseEvent;
use yew::{classes, html, AttrValue, Callback, Component, Context, Html, Properties};

pub struct ConfirmSheet {
    pub id: String,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub open: bool,
    pub message: AttrValue,
    #[prop_or(AttrValue::Static("Eliminar"))]
    pub confirm_label: AttrValue,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
}

impl Component for ConfirmSheet {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            id: format!("id-{}", Uuid::new_v4()),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let on_confirm = props.on_confirm.reform(|_: MouseEvent| ());
        let on_cancel = props.on_cancel.reform(|_: MouseEvent| ());

        html! {
            <div
                class={classes!("top-sheet", props.open.then_some("show"))}
                id={self.id.clone()}
                role="dialog"
                aria-hidden={(!props.open).to_string()}
            >
                <p class="top-sheet-message">{ props.message.clone() }</p>
                <div class="top-sheet-actions">
                    <button class="btn" onclick={on_cancel}>{"Cancelar"}</button>
                    <button class="btn btn-danger" onclick={on_confirm}>
                        { props.confirm_label.clone() }
                    </button>
                </div>
            </div>
        }
    }
}
