//! marquee demo: two scenes showing shape tessellation and text layout
//!
//! Reads window settings from assets/app.ron (defaults if absent), tries to
//! load an atlas font from assets/font.ron + assets/font.png, and falls back
//! to a metrics-only block font so the demo runs with no assets at all.

use std::rc::Rc;

use macroquad::prelude::{info, is_key_pressed, load_texture, warn, Conf, FilterMode, KeyCode};
use macroquad::texture::Texture2D;

use marquee::{
    App, AppConfig, AtlasFont, Color, Font, Glyph, IntRect, Rect, RenderStates, RenderTarget,
    Scene, SceneAction, Shape, Style, Text, Vec2,
};

const CONFIG_PATH: &str = "assets/app.ron";

fn window_conf() -> Conf {
    AppConfig::load(CONFIG_PATH).window_conf()
}

/// Metrics-only placeholder font: every glyph is a filled cell.
///
/// Carries no atlas page, so glyph quads render as solid boxes. Keeps the
/// demo self-contained when no atlas font ships next to the executable.
struct BlockFont;

impl Font for BlockFont {
    fn glyph(&self, ch: char, size: u32, bold: bool) -> Glyph {
        let em = size as f32;
        let width = em * if bold { 0.62 } else { 0.52 };
        // Lowercase cells stay at x-height so words get some texture
        let height = if ch.is_lowercase() { em * 0.52 } else { em * 0.72 };
        Glyph {
            advance: width + em * 0.12,
            bounds: Rect::new(0.0, -height, width, height),
            uv: IntRect::new(0, 0, 1, 1),
        }
    }

    fn kerning(&self, _prev: char, _cur: char, _size: u32) -> f32 {
        0.0
    }

    fn line_spacing(&self, size: u32) -> f32 {
        size as f32 * 1.25
    }

    fn page(&self, _size: u32) -> Option<Texture2D> {
        None
    }
}

/// Atlas font when its two files are present, block font otherwise
async fn load_demo_font() -> Rc<dyn Font> {
    match load_texture("assets/font.png").await {
        Ok(page) => {
            page.set_filter(FilterMode::Nearest);
            match AtlasFont::load("assets/font.ron", Some(page)) {
                Ok(font) => {
                    info!("Loaded atlas font");
                    return Rc::new(font);
                }
                Err(e) => warn!("Failed to load atlas font: {}, using block font", e),
            }
        }
        Err(_) => info!("No atlas font page, using block font"),
    }
    Rc::new(BlockFont)
}

/// Opening scene: tessellated shapes plus styled text
struct GalleryScene {
    title: Text,
    caption: Text,
    hexagon: Shape,
    badge: Shape,
    disc: Shape,
    spin: f32,
}

impl GalleryScene {
    fn new(font: Rc<dyn Font>) -> Self {
        let mut title = Text::with_font("MARQUEE GALLERY", font.clone(), 32);
        title.set_style(Style::BOLD | Style::UNDERLINED);
        title.transformable.position = Vec2::new(24.0, 16.0);

        let mut caption = Text::with_font("space: about    esc: quit", font.clone(), 16);
        caption.set_color(Color::rgb(140, 140, 150));
        caption.transformable.position = Vec2::new(24.0, 430.0);

        let mut hexagon = Shape::circle(60.0, 6);
        hexagon.set_fill_color(Color::rgb(40, 120, 160));
        hexagon.set_outline_thickness(4.0);
        hexagon.set_outline_color(Color::rgb(220, 230, 240));
        hexagon.transformable.origin = Vec2::new(60.0, 60.0);
        hexagon.transformable.position = Vec2::new(320.0, 250.0);

        let mut badge = Shape::rectangle(Vec2::new(130.0, 80.0));
        badge.set_fill_color(Color::rgb(160, 80, 40));
        badge.set_outline_thickness(-4.0);
        badge.set_outline_color(Color::rgb(240, 200, 120));
        badge.transformable.position = Vec2::new(60.0, 180.0);

        let mut disc = Shape::circle(45.0, 32);
        disc.set_fill_color(Color::rgb(70, 140, 70).with_alpha(200));
        disc.transformable.position = Vec2::new(470.0, 190.0);

        Self {
            title,
            caption,
            hexagon,
            badge,
            disc,
            spin: 0.0,
        }
    }
}

impl Scene for GalleryScene {
    fn id(&self) -> &str {
        "gallery"
    }

    fn init(&mut self) {
        info!("gallery ready (marquee v{})", marquee::VERSION);
    }

    fn update(&mut self, dt: f32) -> SceneAction {
        self.spin += dt * 45.0;
        self.hexagon.transformable.rotation = self.spin;

        if is_key_pressed(KeyCode::Space) {
            return SceneAction::Switch("about".to_string());
        }
        if is_key_pressed(KeyCode::Escape) {
            return SceneAction::Quit(0);
        }
        SceneAction::Continue
    }

    fn draw(&mut self, target: &mut dyn RenderTarget) {
        let states = RenderStates::default();
        self.badge.draw(target, &states);
        self.disc.draw(target, &states);
        self.hexagon.draw(target, &states);
        self.title.draw(target, &states);
        self.caption.draw(target, &states);
    }
}

/// Second scene: multi-line text with a caret hopping between characters
struct AboutScene {
    font: Rc<dyn Font>,
    body: Text,
    caret: Shape,
    caret_index: usize,
    caret_clock: f32,
}

impl AboutScene {
    fn new(font: Rc<dyn Font>) -> Self {
        let caret = Shape::rectangle(Vec2::new(3.0, 22.0));
        Self {
            font,
            body: Text::new(),
            caret,
            caret_index: 0,
            caret_clock: 0.0,
        }
    }
}

impl Scene for AboutScene {
    fn id(&self) -> &str {
        "about"
    }

    fn init(&mut self) {
        self.body = Text::with_font(
            "marquee is a scene scaffold.\nshapes tessellate their silhouettes,\ntext lays out one quad per glyph.\n\nspace: back",
            self.font.clone(),
            20,
        );
        self.body.set_style(Style::ITALIC);
        self.body.set_color(Color::rgb(210, 210, 220));
        self.body.transformable.position = Vec2::new(24.0, 40.0);
        self.caret.set_fill_color(Color::rgb(250, 220, 90));
    }

    fn resume(&mut self) {
        self.caret_index = 0;
        self.caret_clock = 0.0;
    }

    fn update(&mut self, dt: f32) -> SceneAction {
        // Walk the caret one character at a time, wrapping past the end
        self.caret_clock += dt;
        if self.caret_clock > 0.08 {
            self.caret_clock = 0.0;
            let len = self.body.string().chars().count();
            self.caret_index = (self.caret_index + 1) % (len + 1);
        }
        self.caret.transformable.position = self.body.find_character_pos(self.caret_index);

        if is_key_pressed(KeyCode::Space) {
            return SceneAction::Switch("gallery".to_string());
        }
        if is_key_pressed(KeyCode::Escape) {
            return SceneAction::Quit(0);
        }
        SceneAction::Continue
    }

    fn draw(&mut self, target: &mut dyn RenderTarget) {
        let states = RenderStates::default();
        self.body.draw(target, &states);
        self.caret.draw(target, &states);
    }
}

fn app_window_title() -> String {
    format!("marquee demo v{}", marquee::VERSION)
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    info!("running from {}", App::exe_dir().display());

    let mut config = AppConfig::load(CONFIG_PATH);
    if config.title == AppConfig::default().title {
        config.title = app_window_title();
    }

    let font = load_demo_font().await;

    let mut app = App::new(config);
    app.scenes().add(Box::new(AboutScene::new(font.clone())));

    let exit_code = app.run(Box::new(GalleryScene::new(font))).await;
    info!("demo finished with exit code {}", exit_code);
}
