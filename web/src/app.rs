use crate::game::GameView;
use crate::login::LoginView;
use crate::profile::Profile;
use clap::Args;
use yew::prelude::*;

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct AppProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    #[prop_or_default]
    pub seed: Option<u32>,
}

pub(crate) enum Msg {
    Login(Profile),
    Logout,
}

/// Switches between the login form and the game, like moving between the two pages.
pub(crate) struct App {
    profile: Option<Profile>,
}

impl Component for App {
    type Message = Msg;
    type Properties = AppProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            profile: Profile::load(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Login(profile) => {
                profile.save();
                self.profile = Some(profile);
            }
            Msg::Logout => {
                log::debug!("logout");
                Profile::forget();
                self.profile = None;
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        match &self.profile {
            Some(profile) => {
                let on_logout = ctx.link().callback(|()| Msg::Logout);
                html! {
                    <GameView profile={profile.clone()} seed={ctx.props().seed} {on_logout}/>
                }
            }
            None => {
                let on_login = ctx.link().callback(Msg::Login);
                html! {
                    <LoginView {on_login} initial_mode={Profile::last_mode()}/>
                }
            }
        }
    }
}
