//! Two-pass WebGL2 renderer behind the home hero.
//!
//! Pass one draws the gold cloth field into an offscreen texture; pass
//! two samples that texture with a slight channel offset and puts the
//! result on screen. Both passes draw a fullscreen quad generated from
//! `gl_VertexID`, so no vertex buffers are involved.

use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as Gl, WebGlFramebuffer, WebGlProgram, WebGlShader,
    WebGlTexture, WebGlUniformLocation,
};

const QUAD_VERT: &str = include_str!("shaders/quad.vert");
const GOLD_FRAG: &str = include_str!("shaders/gold.frag");
const CHROMA_FRAG: &str = include_str!("shaders/chroma.frag");

#[derive(Debug, thiserror::Error)]
pub enum GlSetupError {
    #[error("WebGL2 is not available")]
    ContextUnavailable,
    #[error("shader compile failed: {0}")]
    Compile(String),
    #[error("program link failed: {0}")]
    Link(String),
    #[error("could not allocate a GL object")]
    Alloc,
}

pub struct HeroRenderer {
    gl: Gl,
    canvas: HtmlCanvasElement,
    pixel_ratio: f64,
    gold: WebGlProgram,
    chroma: WebGlProgram,
    target: WebGlTexture,
    fbo: WebGlFramebuffer,
    u_time: Option<WebGlUniformLocation>,
    u_mouse: Option<WebGlUniformLocation>,
    u_texture: Option<WebGlUniformLocation>,
    width: i32,
    height: i32,
}

impl HeroRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, GlSetupError> {
        let gl = canvas
            .get_context("webgl2")
            .ok()
            .flatten()
            .and_then(|obj| obj.dyn_into::<Gl>().ok())
            .ok_or(GlSetupError::ContextUnavailable)?;

        let vert = compile(&gl, Gl::VERTEX_SHADER, QUAD_VERT)?;
        let gold_frag = compile(&gl, Gl::FRAGMENT_SHADER, GOLD_FRAG)?;
        let chroma_frag = compile(&gl, Gl::FRAGMENT_SHADER, CHROMA_FRAG)?;
        let gold = link(&gl, &vert, &gold_frag)?;
        let chroma = link(&gl, &vert, &chroma_frag)?;
        gl.delete_shader(Some(&vert));
        gl.delete_shader(Some(&gold_frag));
        gl.delete_shader(Some(&chroma_frag));

        let u_time = gl.get_uniform_location(&gold, "uTime");
        let u_mouse = gl.get_uniform_location(&gold, "uMouse");
        let u_texture = gl.get_uniform_location(&chroma, "uTexture");

        let target = gl.create_texture().ok_or(GlSetupError::Alloc)?;
        let fbo = gl.create_framebuffer().ok_or(GlSetupError::Alloc)?;

        // Backing store capped at 2x the CSS size.
        let pixel_ratio = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0)
            .min(2.0);

        let mut renderer = Self {
            gl,
            canvas,
            pixel_ratio,
            gold,
            chroma,
            target,
            fbo,
            u_time,
            u_mouse,
            u_texture,
            width: 0,
            height: 0,
        };
        renderer.resize();
        Ok(renderer)
    }

    /// Match the drawing buffer and the offscreen target to the canvas
    /// CSS size. No-op when nothing changed.
    pub fn resize(&mut self) {
        let w = (f64::from(self.canvas.client_width()) * self.pixel_ratio).round() as i32;
        let h = (f64::from(self.canvas.client_height()) * self.pixel_ratio).round() as i32;
        let (w, h) = (w.max(1), h.max(1));
        if (w, h) == (self.width, self.height) {
            return;
        }
        self.width = w;
        self.height = h;
        self.canvas.set_width(w as u32);
        self.canvas.set_height(h as u32);

        let gl = &self.gl;
        gl.bind_texture(Gl::TEXTURE_2D, Some(&self.target));
        let _ = gl.tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_u8_array(
            Gl::TEXTURE_2D,
            0,
            Gl::RGBA as i32,
            w,
            h,
            0,
            Gl::RGBA,
            Gl::UNSIGNED_BYTE,
            None,
        );
        gl.tex_parameteri(Gl::TEXTURE_2D, Gl::TEXTURE_MIN_FILTER, Gl::LINEAR as i32);
        gl.tex_parameteri(Gl::TEXTURE_2D, Gl::TEXTURE_MAG_FILTER, Gl::LINEAR as i32);
        gl.tex_parameteri(Gl::TEXTURE_2D, Gl::TEXTURE_WRAP_S, Gl::CLAMP_TO_EDGE as i32);
        gl.tex_parameteri(Gl::TEXTURE_2D, Gl::TEXTURE_WRAP_T, Gl::CLAMP_TO_EDGE as i32);

        gl.bind_framebuffer(Gl::FRAMEBUFFER, Some(&self.fbo));
        gl.framebuffer_texture_2d(
            Gl::FRAMEBUFFER,
            Gl::COLOR_ATTACHMENT0,
            Gl::TEXTURE_2D,
            Some(&self.target),
            0,
        );
        gl.bind_framebuffer(Gl::FRAMEBUFFER, None);
    }

    /// Render one frame. `now_ms` comes straight from the frame callback;
    /// `mouse` is normalized canvas coordinates with y up.
    pub fn frame(&self, now_ms: f64, mouse: (f32, f32)) {
        let gl = &self.gl;

        gl.bind_framebuffer(Gl::FRAMEBUFFER, Some(&self.fbo));
        gl.viewport(0, 0, self.width, self.height);
        gl.use_program(Some(&self.gold));
        gl.uniform1f(self.u_time.as_ref(), (now_ms * 0.0001) as f32);
        gl.uniform2f(self.u_mouse.as_ref(), mouse.0, mouse.1);
        gl.draw_arrays(Gl::TRIANGLES, 0, 6);

        gl.bind_framebuffer(Gl::FRAMEBUFFER, None);
        gl.viewport(0, 0, self.width, self.height);
        gl.use_program(Some(&self.chroma));
        gl.active_texture(Gl::TEXTURE0);
        gl.bind_texture(Gl::TEXTURE_2D, Some(&self.target));
        gl.uniform1i(self.u_texture.as_ref(), 0);
        gl.draw_arrays(Gl::TRIANGLES, 0, 6);
    }
}

impl Drop for HeroRenderer {
    fn drop(&mut self) {
        let gl = &self.gl;
        gl.delete_program(Some(&self.gold));
        gl.delete_program(Some(&self.chroma));
        gl.delete_texture(Some(&self.target));
        gl.delete_framebuffer(Some(&self.fbo));
    }
}

fn compile(gl: &Gl, kind: u32, src: &str) -> Result<WebGlShader, GlSetupError> {
    let shader = gl.create_shader(kind).ok_or(GlSetupError::Alloc)?;
    gl.shader_source(&shader, src);
    gl.compile_shader(&shader);
    if gl
        .get_shader_parameter(&shader, Gl::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(GlSetupError::Compile(log))
    }
}

fn link(gl: &Gl, vert: &WebGlShader, frag: &WebGlShader) -> Result<WebGlProgram, GlSetupError> {
    let program = gl.create_program().ok_or(GlSetupError::Alloc)?;
    gl.attach_shader(&program, vert);
    gl.attach_shader(&program, frag);
    gl.link_program(&program);
    if gl
        .get_program_parameter(&program, Gl::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        Err(GlSetupError::Link(log))
    }
}
