//! Vocabulary of the legacy grammar (version 1).

use phf::{Map, phf_map};

use super::{INVALID_TOKEN, Token, TokenResolver, namespace_token};

pub const APXL_NS: &str = "http://developer.apple.com/schemas/APXL";

pub const APXL: Token = namespace_token(1);

pub const PRESENTATION: Token = 1;
pub const VERSION: Token = 2;
pub const SIZE: Token = 3;
pub const W: Token = 4;
pub const H: Token = 5;
pub const THEME: Token = 6;
pub const MASTER_SLIDES: Token = 7;
pub const MASTER_SLIDE: Token = 8;
pub const ID: Token = 9;
pub const DRAWABLES: Token = 10;
pub const SLIDE_LIST: Token = 11;
pub const SLIDE: Token = 12;
pub const MASTER_SLIDE_ID: Token = 13;
pub const NOTES: Token = 14;
pub const TRANSITION: Token = 15;
pub const BULLETS: Token = 16;
pub const BULLET: Token = 17;
pub const LEVEL: Token = 18;
pub const CONTENT: Token = 19;
pub const SPAN: Token = 20;
pub const TAB: Token = 21;
pub const BR: Token = 22;
pub const SHAPE: Token = 23;
pub const PATH: Token = 24;
pub const NATURAL_SIZE: Token = 25;
pub const POSITION: Token = 26;
pub const ANGLE: Token = 27;
pub const FILL: Token = 28;
pub const STROKE_COLOR: Token = 29;
pub const STROKE_WIDTH: Token = 30;
pub const OPACITY: Token = 31;
pub const FONT_SIZE: Token = 32;
pub const FONT_NAME: Token = 33;
pub const FONT_COLOR: Token = 34;
pub const BOLD: Token = 35;
pub const ITALIC: Token = 36;
pub const LINE: Token = 37;
pub const HEAD: Token = 38;
pub const TAIL: Token = 39;
pub const IMAGE: Token = 40;
pub const DISPLAY_NAME: Token = 41;
pub const FILE: Token = 42;
pub const TEXTBOX: Token = 43;
pub const G: Token = 44;
pub const PLUGIN: Token = 45;

static NAMES: Map<&'static str, Token> = phf_map! {
    "presentation" => PRESENTATION,
    "version" => VERSION,
    "size" => SIZE,
    "w" => W,
    "h" => H,
    "theme" => THEME,
    "master-slides" => MASTER_SLIDES,
    "master-slide" => MASTER_SLIDE,
    "id" => ID,
    "drawables" => DRAWABLES,
    "slide-list" => SLIDE_LIST,
    "slide" => SLIDE,
    "master-slide-id" => MASTER_SLIDE_ID,
    "notes" => NOTES,
    "transition" => TRANSITION,
    "bullets" => BULLETS,
    "bullet" => BULLET,
    "level" => LEVEL,
    "content" => CONTENT,
    "span" => SPAN,
    "tab" => TAB,
    "br" => BR,
    "shape" => SHAPE,
    "path" => PATH,
    "natural-size" => NATURAL_SIZE,
    "position" => POSITION,
    "angle" => ANGLE,
    "fill" => FILL,
    "stroke-color" => STROKE_COLOR,
    "stroke-width" => STROKE_WIDTH,
    "opacity" => OPACITY,
    "font-size" => FONT_SIZE,
    "font-name" => FONT_NAME,
    "font-color" => FONT_COLOR,
    "bold" => BOLD,
    "italic" => ITALIC,
    "line" => LINE,
    "head" => HEAD,
    "tail" => TAIL,
    "image" => IMAGE,
    "display-name" => DISPLAY_NAME,
    "file" => FILE,
    "textbox" => TEXTBOX,
    "g" => G,
    "plugin" => PLUGIN,
};

/// Resolver for the legacy vocabulary.
#[derive(Debug, Clone, Copy, Default)]
pub struct Key1Tokens;

pub static KEY1_TOKENS: Key1Tokens = Key1Tokens;

impl TokenResolver for Key1Tokens {
    fn name(&self, local: &str) -> Token {
        NAMES.get(local).copied().unwrap_or(INVALID_TOKEN)
    }

    fn namespace(&self, uri: &str) -> Token {
        if uri == APXL_NS {
            APXL
        } else {
            INVALID_TOKEN
        }
    }
}
