use crate::carousel::{DragTracker, LayoutKind, Point, PointerKind, Step, Viewport};
use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::deck::{Deck, Stage};
use crate::gui::theme::{self, ThemeColors};
use crate::gui::view;
use crate::sys::autoplay::Autoplay;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use tokio::runtime::Handle;

pub struct AppInit {
    pub config: Config,
    pub config_path: PathBuf,
    pub layout_override: Option<LayoutKind>,
    pub runtime: Handle,
    pub tx: async_channel::Sender<AppEvent>,
    pub rx: async_channel::Receiver<AppEvent>,
}

pub struct AppModel {
    pub deck: Rc<RefCell<Deck>>,
    pub drag: DragTracker,
    pub autoplay: Autoplay,
    pub pointer_inside: bool,
    pub config_path: PathBuf,
    pub layout_override: Option<LayoutKind>,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    PointerDown { x: f64, kind: PointerKind },
    PointerMove(f64),
    PointerUp(f64),
    PointerCancel,
    Click(Point),
    Step(Step),
    Resize(f64),
    PointerEnter,
    PointerLeave,
    AutoplayTick,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
            AppEvent::AutoplayTick => AppMsg::AutoplayTick,
        }
    }
}

fn pointer_kind(gesture: &gtk::GestureDrag) -> PointerKind {
    match gesture.device().map(|d| d.source()) {
        Some(gdk::InputSource::Touchscreen) => PointerKind::Touch,
        _ => PointerKind::Mouse,
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = AppInit;
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Roleta"),
            set_default_size: (1000, 640),
            add_css_class: "roleta-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    match key {
                        gdk::Key::Left => {
                            sender.input(AppMsg::Step(Step::Prev));
                            glib::Propagation::Stop
                        }
                        gdk::Key::Right => {
                            sender.input(AppMsg::Step(Step::Next));
                            glib::Propagation::Stop
                        }
                        _ => glib::Propagation::Proceed,
                    }
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "roleta-stage",

                connect_resize[sender] => move |_, width, _| {
                    sender.input(AppMsg::Resize(width as f64));
                },

                add_controller = gtk::GestureDrag {
                    set_button: gdk::BUTTON_PRIMARY,
                    connect_drag_begin[sender] => move |gesture, x, _| {
                        sender.input(AppMsg::PointerDown { x, kind: pointer_kind(gesture) });
                    },
                    connect_drag_update[sender] => move |gesture, offset_x, _| {
                        if let Some((x, _)) = gesture.start_point() {
                            sender.input(AppMsg::PointerMove(x + offset_x));
                        }
                    },
                    connect_drag_end[sender] => move |gesture, offset_x, _| {
                        if let Some((x, _)) = gesture.start_point() {
                            sender.input(AppMsg::PointerUp(x + offset_x));
                        }
                    },
                    connect_cancel[sender] => move |_, _| {
                        sender.input(AppMsg::PointerCancel);
                    }
                },

                // GTK stops a click gesture once the pointer travels, so swipes never land here
                add_controller = gtk::GestureClick {
                    set_button: gdk::BUTTON_PRIMARY,
                    connect_released[sender] => move |_, _, x, y| {
                        sender.input(AppMsg::Click(Point::new(x, y)));
                    }
                },

                add_controller = gtk::EventControllerMotion {
                    connect_enter[sender] => move |_, _, _| {
                        sender.input(AppMsg::PointerEnter);
                    },
                    connect_leave[sender] => move |_| {
                        sender.input(AppMsg::PointerLeave);
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let AppInit {
            config,
            config_path,
            layout_override,
            runtime,
            tx,
            rx,
        } = init;

        theme::load_css();

        let deck = Deck::new(&config, Viewport::default());
        if deck.carousel.is_none() {
            log::warn!("No cards configured in {}", config_path.display());
        }

        let mut autoplay = Autoplay::new(config.autoplay_interval(), runtime, tx);
        autoplay.arm();

        let model = AppModel {
            deck: Rc::new(RefCell::new(deck)),
            drag: DragTracker::new(config.thresholds()),
            autoplay,
            pointer_inside: false,
            config_path,
            layout_override,
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let deck_draw = model.deck.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let deck = deck_draw.borrow();
                let Some(carousel) = &deck.carousel else {
                    return;
                };
                let colors = ThemeColors::from_context(&drawing_area.style_context());
                let origin = Point::new(width as f64 / 2.0, height as f64 / 2.0);
                if let Err(e) = view::draw(cr, carousel.sink(), &deck.cards, origin, &colors) {
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

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::PointerDown { x, kind } => {
                self.drag.press(x, kind);
                self.drawing_area.set_cursor_from_name(Some("grabbing"));
            }
            AppMsg::PointerMove(x) => self.drag.track(x),
            AppMsg::PointerUp(x) => {
                self.drawing_area.set_cursor_from_name(Some("default"));
                if let Some(step) = self.drag.release(x) {
                    self.navigate(|carousel| carousel.step(step));
                }
            }
            AppMsg::PointerCancel => {
                self.drag.cancel();
                self.drawing_area.set_cursor_from_name(Some("default"));
            }
            AppMsg::Click(point) => {
                let (width, height) = (
                    self.drawing_area.width() as f64,
                    self.drawing_area.height() as f64,
                );
                let origin = Point::new(width / 2.0, height / 2.0);
                self.navigate(|carousel| {
                    carousel.click(point, origin, width);
                });
            }
            AppMsg::Step(step) => self.navigate(|carousel| carousel.step(step)),
            // ticks queued before a pause are stale
            AppMsg::AutoplayTick if self.autoplay.is_armed() && !self.pointer_inside => {
                self.navigate(Stage::next)
            }
            AppMsg::AutoplayTick => log::trace!("Dropping autoplay tick while paused"),
            AppMsg::Resize(width) => {
                let window_width = match self.root.width() {
                    w if w > 0 => w as f64,
                    _ => width,
                };
                if self.deck.borrow_mut().resize(Viewport::new(width, window_width)) {
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::PointerEnter => {
                self.pointer_inside = true;
                self.autoplay.cancel();
            }
            AppMsg::PointerLeave => {
                self.pointer_inside = false;
                // a swipe in progress keeps going until release
                if !self.drag.is_dragging() {
                    self.drawing_area.set_cursor_from_name(Some("default"));
                }
                self.autoplay.arm();
            }
            AppMsg::ConfigReload => match config::reload(&self.config_path) {
                Ok(new_config) => {
                    self.apply_config(new_config);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

impl AppModel {
    fn navigate(&self, f: impl FnOnce(&mut Stage)) {
        if self.deck.borrow_mut().with_carousel(f) {
            self.drawing_area.queue_draw();
        }
    }

    fn apply_config(&mut self, mut config: Config) {
        if let Some(layout) = self.layout_override {
            config.layout = layout;
        }

        self.deck.borrow_mut().reload(&config);
        self.drag.set_thresholds(config.thresholds());
        self.autoplay.set_interval(config.autoplay_interval());
        if !self.pointer_inside && !self.autoplay.is_armed() {
            self.autoplay.arm();
        }
        self.drawing_area.queue_draw();
    }
}
