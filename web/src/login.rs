use crate::profile::{Profile, is_valid_name};
use concentration_core::GameMode;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct LoginProps {
    pub on_login: Callback<Profile>,
    #[prop_or_default]
    pub initial_mode: GameMode,
}

#[function_component(LoginView)]
pub(crate) fn login_view(props: &LoginProps) -> Html {
    let name = use_state(String::new);
    let mode = use_state(|| props.initial_mode);

    let oninput = {
        let name = name.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            name.set(input.value());
        })
    };

    let select_mode = |value: GameMode| {
        let mode = mode.clone();
        Callback::from(move |_: Event| {
            log::trace!("mode selected: {:?}", value);
            mode.set(value);
        })
    };

    let onsubmit = {
        let name = name.clone();
        let mode = mode.clone();
        let on_login = props.on_login.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match Profile::from_form(&name, *mode) {
                Some(profile) => {
                    log::debug!("login: {:?}", profile);
                    on_login.emit(profile);
                }
                None => log::debug!("login ignored, name is blank"),
            }
        })
    };

    let disabled = !is_valid_name(&name);

    html! {
        <form class="login-form" {onsubmit}>
            <h1>{"Concentration"}</h1>
            <input
                class="login__input"
                type="text"
                placeholder="Your name"
                value={(*name).clone()}
                {oninput}
            />
            <fieldset>
                <label>
                    <input
                        type="radio"
                        name="mode"
                        checked={*mode == GameMode::Normal}
                        onchange={select_mode(GameMode::Normal)}
                    />
                    {"Normal"}
                </label>
                <label>
                    <input
                        type="radio"
                        name="mode"
                        checked={*mode == GameMode::Timed}
                        onchange={select_mode(GameMode::Timed)}
                    />
                    {"Hard (timed)"}
                </label>
            </fieldset>
            <button type="submit" class="login__button" {disabled}>{"Play"}</button>
        </form>
    }
}
