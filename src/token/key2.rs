//! Vocabulary of the unified grammar (versions 2 to 5).
//!
//! Element and attribute names of the `key`, `sf` and `sfa` namespaces share
//! one name table; the namespace half of the token tells them apart.

use phf::{Map, phf_map};

use super::{Token, TokenResolver, namespace_token};

pub const KEY_NS: &str = "http://developer.apple.com/namespaces/keynote2";
pub const SF_NS: &str = "http://developer.apple.com/namespaces/sf";
pub const SFA_NS: &str = "http://developer.apple.com/namespaces/sfa";
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

pub const KEY: Token = namespace_token(1);
pub const SF: Token = namespace_token(2);
pub const SFA: Token = namespace_token(3);
pub const XSI: Token = namespace_token(4);

static NAMESPACES: Map<&'static str, Token> = phf_map! {
    "http://developer.apple.com/namespaces/keynote2" => KEY,
    "http://developer.apple.com/namespaces/sf" => SF,
    "http://developer.apple.com/namespaces/sfa" => SFA,
    "http://www.w3.org/2001/XMLSchema-instance" => XSI,
};

pub const PRESENTATION: Token = 1;
pub const VERSION: Token = 2;
pub const SIZE: Token = 3;
pub const THEME_LIST: Token = 4;
pub const THEME: Token = 5;
pub const STYLESHEET: Token = 6;
pub const STYLESHEET_REF: Token = 7;
pub const MASTER_SLIDES: Token = 8;
pub const MASTER_SLIDE: Token = 9;
pub const MASTER_REF: Token = 10;
pub const SLIDE_LIST: Token = 11;
pub const SLIDE: Token = 12;
pub const PAGE: Token = 13;
pub const NOTES: Token = 14;
pub const METADATA: Token = 15;
pub const UI_STATE: Token = 16;
pub const CALC_ENGINE: Token = 17;
pub const THUMBNAILS: Token = 18;
pub const BUILD_CHUNKS: Token = 19;
pub const TRANSITION: Token = 20;
pub const STICKY_NOTES: Token = 21;
pub const STYLES: Token = 22;
pub const ANON_STYLES: Token = 23;
pub const CHARACTERSTYLE: Token = 24;
pub const GRAPHIC_STYLE: Token = 25;
pub const LAYOUTSTYLE: Token = 26;
pub const PARAGRAPHSTYLE: Token = 27;
pub const CELL_STYLE: Token = 28;
pub const CONNECTION_STYLE: Token = 29;
pub const LISTSTYLE: Token = 30;
pub const PLACEHOLDER_STYLE: Token = 31;
pub const SLIDE_STYLE: Token = 32;
pub const TABULAR_STYLE: Token = 33;
pub const VECTOR_STYLE: Token = 34;
pub const CHARACTERSTYLE_REF: Token = 35;
pub const GRAPHIC_STYLE_REF: Token = 36;
pub const LAYOUTSTYLE_REF: Token = 37;
pub const PARAGRAPHSTYLE_REF: Token = 38;
pub const CELL_STYLE_REF: Token = 39;
pub const CONNECTION_STYLE_REF: Token = 40;
pub const LISTSTYLE_REF: Token = 41;
pub const PLACEHOLDER_STYLE_REF: Token = 42;
pub const SLIDE_STYLE_REF: Token = 43;
pub const TABULAR_STYLE_REF: Token = 44;
pub const VECTOR_STYLE_REF: Token = 45;
pub const ID: Token = 46;
pub const IDREF: Token = 47;
pub const IDENT: Token = 48;
pub const PARENT_IDENT: Token = 49;
pub const PROPERTY_MAP: Token = 50;
pub const PARENT_REF: Token = 51;
pub const FILL: Token = 52;
pub const STROKE: Token = 53;
pub const WIDTH: Token = 54;
pub const OPACITY: Token = 55;
pub const FONT_SIZE: Token = 56;
pub const FONT_NAME: Token = 57;
pub const BOLD: Token = 58;
pub const ITALIC: Token = 59;
pub const UNDERLINE: Token = 60;
pub const FONT_COLOR: Token = 61;
pub const ALIGNMENT: Token = 62;
pub const FIRST_LINE_INDENT: Token = 63;
pub const TABS: Token = 64;
pub const SHADOW: Token = 65;
pub const REFLECTION: Token = 66;
pub const PATTERN: Token = 67;
pub const NUMBER: Token = 68;
pub const STRING: Token = 69;
pub const COLOR: Token = 70;
pub const R: Token = 71;
pub const G: Token = 72;
pub const B: Token = 73;
pub const A: Token = 74;
pub const W: Token = 75;
pub const H: Token = 76;
pub const X: Token = 77;
pub const Y: Token = 78;
pub const LAYERS: Token = 79;
pub const LAYER: Token = 80;
pub const LAYER_REF: Token = 81;
pub const DRAWABLES: Token = 82;
pub const PROXY_MASTER_LAYER: Token = 83;
pub const DRAWABLE_SHAPE: Token = 84;
pub const GEOMETRY: Token = 85;
pub const GEOMETRY_REF: Token = 86;
pub const STYLE: Token = 87;
pub const PATH: Token = 88;
pub const TEXT: Token = 89;
pub const IMAGE: Token = 90;
pub const IMAGE_REF: Token = 91;
pub const LINE: Token = 92;
pub const LINE_REF: Token = 93;
pub const MEDIA: Token = 94;
pub const MEDIA_REF: Token = 95;
pub const GROUP: Token = 96;
pub const GROUP_REF: Token = 97;
pub const STICKY_NOTE: Token = 98;
pub const TITLE_PLACEHOLDER: Token = 99;
pub const BODY_PLACEHOLDER: Token = 100;
pub const TITLE_PLACEHOLDER_REF: Token = 101;
pub const BODY_PLACEHOLDER_REF: Token = 102;
pub const HEAD: Token = 103;
pub const TAIL: Token = 104;
pub const ANGLE: Token = 105;
pub const SHEAR_X_ANGLE: Token = 106;
pub const SHEAR_Y_ANGLE: Token = 107;
pub const HORIZONTAL_FLIP: Token = 108;
pub const VERTICAL_FLIP: Token = 109;
pub const ASPECT_RATIO_LOCKED: Token = 110;
pub const SIZES_LOCKED: Token = 111;
pub const NATURAL_SIZE: Token = 112;
pub const POSITION: Token = 113;
pub const BEZIER_PATH: Token = 114;
pub const BEZIER: Token = 115;
pub const BEZIER_REF: Token = 116;
pub const POINT_PATH: Token = 117;
pub const TYPE: Token = 118;
pub const POINT: Token = 119;
pub const SCALAR_PATH: Token = 120;
pub const SCALAR: Token = 121;
pub const CONNECTION_PATH: Token = 122;
pub const CALLOUT2_PATH: Token = 123;
pub const CORNER_RADIUS: Token = 124;
pub const TAIL_AT_CENTER: Token = 125;
pub const TAIL_POSITION_X: Token = 126;
pub const TAIL_POSITION_Y: Token = 127;
pub const TAIL_SIZE: Token = 128;
pub const EDITABLE_PATH: Token = 129;
pub const TEXT_STORAGE: Token = 130;
pub const TEXT_BODY: Token = 131;
pub const P: Token = 132;
pub const SPAN: Token = 133;
pub const TAB: Token = 134;
pub const BR: Token = 135;
pub const LNBR: Token = 136;
pub const CRBR: Token = 137;
pub const LAYOUT: Token = 138;
pub const DATA: Token = 139;
pub const DATA_REF: Token = 140;
pub const DISPLAYNAME: Token = 141;
pub const HFS_TYPE: Token = 142;
pub const NIL: Token = 143;

static NAMES: Map<&'static str, Token> = phf_map! {
    "presentation" => PRESENTATION,
    "version" => VERSION,
    "size" => SIZE,
    "theme-list" => THEME_LIST,
    "theme" => THEME,
    "stylesheet" => STYLESHEET,
    "stylesheet-ref" => STYLESHEET_REF,
    "master-slides" => MASTER_SLIDES,
    "master-slide" => MASTER_SLIDE,
    "master-ref" => MASTER_REF,
    "slide-list" => SLIDE_LIST,
    "slide" => SLIDE,
    "page" => PAGE,
    "notes" => NOTES,
    "metadata" => METADATA,
    "ui-state" => UI_STATE,
    "calc-engine" => CALC_ENGINE,
    "thumbnails" => THUMBNAILS,
    "build-chunks" => BUILD_CHUNKS,
    "transition" => TRANSITION,
    "sticky-notes" => STICKY_NOTES,
    "styles" => STYLES,
    "anon-styles" => ANON_STYLES,
    "characterstyle" => CHARACTERSTYLE,
    "graphic-style" => GRAPHIC_STYLE,
    "layoutstyle" => LAYOUTSTYLE,
    "paragraphstyle" => PARAGRAPHSTYLE,
    "cell-style" => CELL_STYLE,
    "connection-style" => CONNECTION_STYLE,
    "liststyle" => LISTSTYLE,
    "placeholder-style" => PLACEHOLDER_STYLE,
    "slide-style" => SLIDE_STYLE,
    "tabular-style" => TABULAR_STYLE,
    "vector-style" => VECTOR_STYLE,
    "characterstyle-ref" => CHARACTERSTYLE_REF,
    "graphic-style-ref" => GRAPHIC_STYLE_REF,
    "layoutstyle-ref" => LAYOUTSTYLE_REF,
    "paragraphstyle-ref" => PARAGRAPHSTYLE_REF,
    "cell-style-ref" => CELL_STYLE_REF,
    "connection-style-ref" => CONNECTION_STYLE_REF,
    "liststyle-ref" => LISTSTYLE_REF,
    "placeholder-style-ref" => PLACEHOLDER_STYLE_REF,
    "slide-style-ref" => SLIDE_STYLE_REF,
    "tabular-style-ref" => TABULAR_STYLE_REF,
    "vector-style-ref" => VECTOR_STYLE_REF,
    "ID" => ID,
    "IDREF" => IDREF,
    "ident" => IDENT,
    "parent-ident" => PARENT_IDENT,
    "property-map" => PROPERTY_MAP,
    "parent-ref" => PARENT_REF,
    "fill" => FILL,
    "stroke" => STROKE,
    "width" => WIDTH,
    "opacity" => OPACITY,
    "fontSize" => FONT_SIZE,
    "fontName" => FONT_NAME,
    "bold" => BOLD,
    "italic" => ITALIC,
    "underline" => UNDERLINE,
    "fontColor" => FONT_COLOR,
    "alignment" => ALIGNMENT,
    "firstLineIndent" => FIRST_LINE_INDENT,
    "tabs" => TABS,
    "shadow" => SHADOW,
    "reflection" => REFLECTION,
    "pattern" => PATTERN,
    "number" => NUMBER,
    "string" => STRING,
    "color" => COLOR,
    "r" => R,
    "g" => G,
    "b" => B,
    "a" => A,
    "w" => W,
    "h" => H,
    "x" => X,
    "y" => Y,
    "layers" => LAYERS,
    "layer" => LAYER,
    "layer-ref" => LAYER_REF,
    "drawables" => DRAWABLES,
    "proxy-master-layer" => PROXY_MASTER_LAYER,
    "drawable-shape" => DRAWABLE_SHAPE,
    "geometry" => GEOMETRY,
    "geometry-ref" => GEOMETRY_REF,
    "style" => STYLE,
    "path" => PATH,
    "text" => TEXT,
    "image" => IMAGE,
    "image-ref" => IMAGE_REF,
    "line" => LINE,
    "line-ref" => LINE_REF,
    "media" => MEDIA,
    "media-ref" => MEDIA_REF,
    "group" => GROUP,
    "group-ref" => GROUP_REF,
    "sticky-note" => STICKY_NOTE,
    "title-placeholder" => TITLE_PLACEHOLDER,
    "body-placeholder" => BODY_PLACEHOLDER,
    "title-placeholder-ref" => TITLE_PLACEHOLDER_REF,
    "body-placeholder-ref" => BODY_PLACEHOLDER_REF,
    "head" => HEAD,
    "tail" => TAIL,
    "angle" => ANGLE,
    "shearXAngle" => SHEAR_X_ANGLE,
    "shearYAngle" => SHEAR_Y_ANGLE,
    "horizontalFlip" => HORIZONTAL_FLIP,
    "verticalFlip" => VERTICAL_FLIP,
    "aspectRatioLocked" => ASPECT_RATIO_LOCKED,
    "sizesLocked" => SIZES_LOCKED,
    "naturalSize" => NATURAL_SIZE,
    "position" => POSITION,
    "bezier-path" => BEZIER_PATH,
    "bezier" => BEZIER,
    "bezier-ref" => BEZIER_REF,
    "point-path" => POINT_PATH,
    "type" => TYPE,
    "point" => POINT,
    "scalar-path" => SCALAR_PATH,
    "scalar" => SCALAR,
    "connection-path" => CONNECTION_PATH,
    "callout2-path" => CALLOUT2_PATH,
    "cornerRadius" => CORNER_RADIUS,
    "tailAtCenter" => TAIL_AT_CENTER,
    "tailPositionX" => TAIL_POSITION_X,
    "tailPositionY" => TAIL_POSITION_Y,
    "tailSize" => TAIL_SIZE,
    "editable-path" => EDITABLE_PATH,
    "text-storage" => TEXT_STORAGE,
    "text-body" => TEXT_BODY,
    "p" => P,
    "span" => SPAN,
    "tab" => TAB,
    "br" => BR,
    "lnbr" => LNBR,
    "crbr" => CRBR,
    "layout" => LAYOUT,
    "data" => DATA,
    "data-ref" => DATA_REF,
    "displayname" => DISPLAYNAME,
    "hfs-type" => HFS_TYPE,
    "nil" => NIL,
};

/// `key:version` stamps and the format version each one denotes.
pub static VERSION_STAMPS: Map<&'static str, u8> = phf_map! {
    "2004102100" => 2,
    "2005092101" => 3,
    "72007061400" => 4,
    "92008102400" => 5,
};

/// Resolver for the unified vocabulary.
#[derive(Debug, Clone, Copy, Default)]
pub struct Key2Tokens;

pub static KEY2_TOKENS: Key2Tokens = Key2Tokens;

impl TokenResolver for Key2Tokens {
    #[inline]
    fn name(&self, local: &str) -> Token {
        NAMES.get(local).copied().unwrap_or(super::INVALID_TOKEN)
    }

    #[inline]
    fn namespace(&self, uri: &str) -> Token {
        NAMESPACES.get(uri).copied().unwrap_or(super::INVALID_TOKEN)
    }
}
