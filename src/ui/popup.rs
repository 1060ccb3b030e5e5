/// Popup UI for Tab URL Exporter

use std::cell::RefCell;
use std::rc::Rc;
use gloo_timers::callback::Timeout;
use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlTextAreaElement;
use patternfly_yew::prelude::*;
use crate::browser::WebPlatform;
use crate::config::PopupConfig;
use crate::controller::{PopupController, PopupView};
use crate::notification::{Notification, NotificationState};

/// Everything the popup shows, owned by the page for its lifetime
#[derive(Clone, Debug, PartialEq)]
pub struct PopupState {
    pub display_text: String,
    pub tab_count: usize,
    pub refresh_enabled: bool,
    pub placeholder: String,
    pub notification: NotificationState,
}

impl PopupState {
    pub fn new(config: &PopupConfig) -> PopupState {
        PopupState {
            display_text: String::new(),
            tab_count: 0,
            refresh_enabled: true,
            placeholder: config.idle_placeholder.clone(),
            notification: NotificationState::default(),
        }
    }
}

struct PendingTimers {
    _show: Timeout,
    _hide: Timeout,
}

/// Owns the one pending show/hide timer pair
#[derive(Clone)]
pub struct NotificationCenter {
    state: Rc<RefCell<PopupState>>,
    rerender: UseForceUpdateHandle,
    pending: Rc<RefCell<Option<PendingTimers>>>,
    show_delay_ms: u32,
}

impl NotificationCenter {
    fn new(state: Rc<RefCell<PopupState>>, rerender: UseForceUpdateHandle, config: &PopupConfig) -> Self {
        NotificationCenter {
            state,
            rerender,
            pending: Rc::new(RefCell::new(None)),
            show_delay_ms: config.notification_show_delay_ms,
        }
    }

    fn post(&self, notification: Notification) {
        let duration_ms = notification.duration_ms;

        // Dropping a Timeout clears it
        self.pending.borrow_mut().take();

        let ticket = self.state.borrow_mut().notification.post(notification);
        self.rerender.force_update();

        let show = {
            let state = self.state.clone();
            let rerender = self.rerender.clone();
            Timeout::new(self.show_delay_ms, move || {
                if state.borrow_mut().notification.reveal(ticket) {
                    rerender.force_update();
                }
            })
        };

        let hide = {
            let state = self.state.clone();
            let rerender = self.rerender.clone();
            Timeout::new(duration_ms, move || {
                if state.borrow_mut().notification.dismiss(ticket) {
                    rerender.force_update();
                }
            })
        };

        *self.pending.borrow_mut() = Some(PendingTimers {
            _show: show,
            _hide: hide,
        });
    }
}

/// Binds the controller to the popup's state; built once at mount
#[derive(Clone)]
pub struct PopupBindings {
    state: Rc<RefCell<PopupState>>,
    rerender: UseForceUpdateHandle,
    notifications: NotificationCenter,
}

impl PopupBindings {
    pub fn new(state: Rc<RefCell<PopupState>>, rerender: UseForceUpdateHandle, config: &PopupConfig) -> Self {
        let notifications = NotificationCenter::new(state.clone(), rerender.clone(), config);
        PopupBindings {
            state,
            rerender,
            notifications,
        }
    }

    fn update(&self, f: impl FnOnce(&mut PopupState)) {
        f(&mut *self.state.borrow_mut());
        self.rerender.force_update();
    }
}

impl PopupView for PopupBindings {
    fn display_text(&self) -> String {
        self.state.borrow().display_text.clone()
    }

    fn set_display_text(&self, text: String) {
        self.update(|state| state.display_text = text);
    }

    fn set_tab_count(&self, count: usize) {
        self.update(|state| state.tab_count = count);
    }

    fn set_refresh_enabled(&self, enabled: bool) {
        self.update(|state| state.refresh_enabled = enabled);
    }

    fn set_placeholder(&self, placeholder: &str) {
        self.update(|state| state.placeholder = placeholder.to_string());
    }

    fn notify(&self, notification: Notification) {
        self.notifications.post(notification);
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let display_ref = use_node_ref();
    let state = use_mut_ref(|| PopupState::new(&PopupConfig::default()));
    let rerender = use_force_update();

    let controller = {
        let display_ref = display_ref.clone();
        let state = state.clone();
        let rerender = rerender.clone();
        use_memo((), move |_| {
            let config = PopupConfig::default();
            let bindings = PopupBindings::new(state, rerender, &config);
            PopupController::new(WebPlatform::new(display_ref), bindings, config)
        })
    };

    // Load URLs on mount
    {
        let controller = controller.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                controller.display_urls().await;
            });
            || ()
        });
    }

    let on_refresh = {
        let controller = controller.clone();
        Callback::from(move |_| {
            let controller = controller.clone();
            spawn_local(async move {
                controller.refresh().await;
            });
        })
    };

    let on_copy = {
        let controller = controller.clone();
        Callback::from(move |_| {
            let controller = controller.clone();
            spawn_local(async move {
                controller.copy().await;
            });
        })
    };

    let on_download = {
        let controller = controller.clone();
        Callback::from(move |_| {
            controller.download();
        })
    };

    // Keep edits made in the textarea; copy and download read them
    let on_input = {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(textarea) = e.target_dyn_into::<HtmlTextAreaElement>() {
                state.borrow_mut().display_text = textarea.value();
            }
        })
    };

    let snapshot = state.borrow().clone();
    let message = snapshot
        .notification
        .current()
        .map(|n| n.message.clone())
        .unwrap_or_default();

    html! {
        <div class="padding-20">
            <div class="popup-header">
                <h1 class="popup-title">{"Tab URL Exporter"}</h1>
                <span class="tab-count">
                    <span id="tabCount">{snapshot.tab_count}</span>
                    {" tabs"}
                </span>
            </div>

            <textarea
                ref={display_ref}
                id="urlList"
                class="url-list"
                spellcheck="false"
                value={snapshot.display_text.clone()}
                placeholder={snapshot.placeholder.clone()}
                oninput={on_input}
            />

            <div class="flex-row-gap">
                <Button onclick={on_refresh} disabled={!snapshot.refresh_enabled} variant={ButtonVariant::Secondary}>
                    {"🔄 Refresh"}
                </Button>
                <Button onclick={on_copy} variant={ButtonVariant::Primary}>
                    {"📋 Copy"}
                </Button>
                <Button onclick={on_download} variant={ButtonVariant::Primary}>
                    {"💾 Download"}
                </Button>
            </div>

            if !snapshot.refresh_enabled {
                <div class="loading-text-center">
                    <Spinner />
                </div>
            }

            <div id="notification" class={snapshot.notification.css_class()} role="status">
                {message}
            </div>
        </div>
    }
}
