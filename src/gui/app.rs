use crate::config;
use crate::events::{AppEvent, Step};
use crate::gui::gauge::{self, Gauge, Limit, PointerEvent, PointerPhase, StepOutcome};
use crate::gui::theme::{self, ThemeColors};
use crate::gui::window;
use crate::icon;
use gdk_pixbuf::Pixbuf;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

const TOAST_DURATION: Duration = Duration::from_millis(1500);

pub struct AppModel {
    pub gauge: Rc<RefCell<Gauge>>,
    pub icon: Rc<RefCell<Option<Pixbuf>>>,
    pub drawing_area: gtk::DrawingArea,
    pub toast: Option<Limit>,
    toast_serial: u64,
}

#[derive(Debug)]
pub enum AppMsg {
    Pointer(PointerEvent),
    Resize(i32, i32),
    Step(Step),
    SetActive(u32),
    ConfigReload,
    HideToast(u64),
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Step(step) => AppMsg::Step(step),
            AppEvent::SetActive(count) => AppMsg::SetActive(count),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Gauge, Option<Pixbuf>, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Voice Dial"),

            #[name = "overlay"]
            gtk::Overlay {
                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,
                    add_css_class: "voicedial-drawing-area",

                    connect_resize[sender] => move |_, width, height| {
                        sender.input(AppMsg::Resize(width, height));
                    },

                    add_controller = gtk::EventControllerMotion {
                        connect_motion[sender] => move |_, x, y| {
                            sender.input(AppMsg::Pointer(PointerEvent::new(PointerPhase::Move, x, y)));
                        }
                    },

                    add_controller = gtk::GestureClick {
                        connect_pressed[sender] => move |gesture, _, x, y| {
                            gesture.set_state(gtk::EventSequenceState::Claimed);
                            sender.input(AppMsg::Pointer(PointerEvent::new(PointerPhase::Down, x, y)));
                        },
                        connect_released[sender] => move |_, _, x, y| {
                            sender.input(AppMsg::Pointer(PointerEvent::new(PointerPhase::Up, x, y)));
                        },
                        connect_cancel[sender] => move |_, _| {
                            sender.input(AppMsg::Pointer(window::cancel_event()));
                        }
                    }
                },

                add_overlay = &gtk::Label {
                    set_halign: gtk::Align::Center,
                    set_valign: gtk::Align::End,
                    set_can_target: false,
                    add_css_class: "voicedial-toast",
                    #[watch]
                    set_visible: model.toast.is_some(),
                    #[watch]
                    set_label: &model.toast_text(),
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (gauge, icon, rx) = init;

        theme::load_css();

        let viewport = gauge.viewport();
        let model = AppModel {
            gauge: Rc::new(RefCell::new(gauge)),
            icon: Rc::new(RefCell::new(icon)),
            drawing_area: gtk::DrawingArea::default(),
            toast: None,
            toast_serial: 0,
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();
        window::apply_measured_size(&root, &model.drawing_area, viewport);

        let gauge_draw = model.gauge.clone();
        let icon_draw = model.icon.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                let icon = icon_draw.borrow();
                if let Err(e) = gauge::draw(cr, &gauge_draw.borrow(), icon.as_ref(), &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Pointer(event) => {
                let outcome = self.gauge.borrow_mut().handle_pointer(event);
                if let Some(outcome) = outcome {
                    self.apply(outcome, &sender);
                }
            }
            AppMsg::Resize(width, height) => {
                self.gauge.borrow_mut().resize(
                    window::from_gtk_size(width),
                    window::from_gtk_size(height),
                );
                self.drawing_area.queue_draw();
            }
            AppMsg::Step(step) => {
                let outcome = self.gauge.borrow_mut().step(step);
                self.apply(outcome, &sender);
            }
            AppMsg::SetActive(count) => {
                let outcome = self.gauge.borrow_mut().set_active(count);
                self.apply(outcome, &sender);
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    let result = self.gauge.borrow_mut().reconfigure(&new_config);
                    match result {
                        Ok(()) => {
                            *self.icon.borrow_mut() = icon::load_icon(&new_config.icon);
                            self.drawing_area.queue_draw();
                            log::info!("Configuration reloaded");
                        }
                        Err(e) => log::error!("Ignoring invalid configuration: {}", e),
                    }
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppMsg::HideToast(serial) => {
                if serial == self.toast_serial {
                    self.toast = None;
                }
            }
        }
    }
}

impl AppModel {
    fn toast_text(&self) -> String {
        self.toast.map(|limit| limit.to_string()).unwrap_or_default()
    }

    fn apply(&mut self, outcome: StepOutcome, sender: &ComponentSender<Self>) {
        match outcome {
            StepOutcome::Changed(active) => {
                log::debug!("Active segments: {}", active);
                self.drawing_area.queue_draw();
            }
            StepOutcome::AtLimit(limit) => {
                log::warn!("{}", limit);
                self.show_toast(limit, sender);
            }
        }
    }

    /// A newer toast restarts the timer; stale timeouts are ignored by serial.
    fn show_toast(&mut self, limit: Limit, sender: &ComponentSender<Self>) {
        self.toast = Some(limit);
        self.toast_serial += 1;

        let serial = self.toast_serial;
        let sender = sender.clone();
        glib::timeout_add_local_once(TOAST_DURATION, move || {
            sender.input(AppMsg::HideToast(serial));
        });
    }
}
