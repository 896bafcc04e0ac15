//! Server-rendered pages: `/`, `/about`, `/login`, `/admin/hero`.
//!
//! The landing page is rendered from the current hero document. Carousel
//! and card rotator intervals are computed server-side and handed to a small
//! inline script through `data-*` attributes. The script also refetches the
//! document on window focus and on `hero-updated` events, reloading when it
//! changed. The lead form is checked and acknowledged in the browser with the
//! rules from `vms_core::lead`; lead data is never sent anywhere.
//!
//! `/login` and `/admin/hero` keep the signed-in role in the browser's local
//! storage. The admin page checks it before showing the editor; this is a
//! convenience gate, not access control.

use std::fmt::Write as _;
use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::Router;

use vms_core::hero::{Card, CardKind};
use vms_core::lead::{EMAIL_PATTERN, MIN_PHONE_DIGITS, TICKET_ALPHABET, TICKET_LEN, TICKET_PREFIX};
use vms_core::site::{CardRotator, PublicView};

use crate::state::AppState;

/// Build the pages router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(landing_page))
        .route("/about", get(about_page))
        .route("/login", get(login_page))
        .route("/admin/hero", get(admin_page))
}

async fn landing_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let view = PublicView::new(state.store.load().await);
    Html(page_shell("Marine Supplies & Technical Services", "home", &render_landing(&view)))
}

async fn about_page() -> Html<String> {
    Html(page_shell("About", "about", ABOUT_BODY))
}

async fn login_page() -> Html<String> {
    Html(page_shell("Login", "login", LOGIN_BODY))
}

async fn admin_page() -> Html<String> {
    Html(page_shell("Hero Editor", "admin", ADMIN_BODY))
}

// ── Rendering ────────────────────────────────────────────────────────

/// Wrap `body` in the shared head, navigation and footer.
fn page_shell(title: &str, active: &str, body: &str) -> String {
    let nav_item = |href: &str, id: &str, label: &str| -> String {
        let class = if active == id { "nav-link active" } else { "nav-link" };
        format!(r#"<a href="{href}" class="{class}">{label}</a>"#)
    };

    let mut html = String::with_capacity(16384 + body.len());
    html.push_str(&PAGE_HEAD.replace("{{TITLE}}", &escape_html(title)));
    html.push_str("<body>\n<nav class=\"nav\"><a href=\"/\" class=\"nav-logo\">VMS</a><div class=\"nav-links\">");
    html.push_str(&nav_item("/", "home", "Home"));
    html.push_str(&nav_item("/about", "about", "About"));
    html.push_str(&nav_item("/#catalogues", "catalogues", "Catalogues"));
    html.push_str(&nav_item("/login", "login", "Login"));
    html.push_str("</div></nav>\n<main id=\"main\">\n");
    html.push_str(body);
    html.push_str("</main>\n");
    html.push_str(PAGE_FOOTER);
    html.push_str("</body></html>\n");
    html
}

/// Render the landing page body for one view.
fn render_landing(view: &PublicView) -> String {
    let cfg = &view.config;
    let hero_interval = view
        .carousel
        .interval()
        .map_or(0, |d| d.as_millis());

    let mut html = String::with_capacity(16384);

    // Hero
    let _ = write!(
        html,
        r#"<section class="hero" id="hero" data-interval="{hero_interval}">"#
    );
    html.push_str(r#"<div class="slides">"#);
    for (i, slide) in cfg.slides.iter().enumerate() {
        let active = if i == view.carousel.index() { " active" } else { "" };
        let _ = write!(
            html,
            r#"<img class="slide{active}" src="{}" alt="{}">"#,
            escape_html(&slide.src),
            escape_html(slide.alt.as_deref().unwrap_or_default()),
        );
    }
    html.push_str("</div>");
    if view.carousel.autoplay() {
        html.push_str(r#"<button class="hero-prev" type="button" aria-label="Previous slide">&#8249;</button><button class="hero-next" type="button" aria-label="Next slide">&#8250;</button><div class="dots">"#);
        for i in 0..view.carousel.total() {
            let active = if i == view.carousel.index() { " active" } else { "" };
            let _ = write!(
                html,
                r#"<button class="dot{active}" type="button" data-go="{i}" aria-label="Slide {}"></button>"#,
                i + 1
            );
        }
        html.push_str("</div>");
    }
    let _ = write!(
        html,
        r#"<div class="hero-copy"><h1>{}</h1><p>{}</p><div class="hero-actions"><a class="btn btn-primary" href="{}">{}</a><a class="btn btn-outline" href="{}">{}</a></div></div></section>"#,
        escape_html(&cfg.title),
        escape_html(&cfg.subtitle),
        escape_html(&cfg.button1.href),
        escape_html(&cfg.button1.text),
        escape_html(&cfg.button2.href),
        escape_html(&cfg.button2.text),
    );
    html.push('\n');

    render_cards(&mut html, CardKind::Products, cfg.cards(CardKind::Products), view.rotators(CardKind::Products));
    render_cards(
        &mut html,
        CardKind::TechnicalServices,
        cfg.cards(CardKind::TechnicalServices),
        view.rotators(CardKind::TechnicalServices),
    );

    html.push_str(&render_lead_form());
    html.push_str(CATALOGUES);

    let snapshot = serde_json::to_string(cfg)
        .unwrap_or_default()
        .replace("</", "<\\/");
    let _ = write!(
        html,
        r#"<script type="application/json" id="hero-config">{snapshot}</script>"#
    );
    html.push_str(LANDING_SCRIPT);
    html
}

/// The lead form, carrying its validation and ticket rules as `data-*`
/// attributes for the inline script.
fn render_lead_form() -> String {
    let rules = format!(
        r#"data-email-pattern="{}" data-min-phone-digits="{MIN_PHONE_DIGITS}" data-ticket-prefix="{}" data-ticket-length="{TICKET_LEN}" data-ticket-alphabet="{TICKET_ALPHABET}""#,
        escape_html(EMAIL_PATTERN),
        escape_html(TICKET_PREFIX),
    );
    LEAD_FORM.replace("{{LEAD_RULES}}", &rules)
}

/// Render one card collection. Empty collections render nothing.
fn render_cards(html: &mut String, kind: CardKind, cards: &[Card], rotators: &[CardRotator]) {
    if cards.is_empty() {
        return;
    }
    let id = match kind {
        CardKind::Products => "products",
        CardKind::TechnicalServices => "technicalServices",
    };
    let _ = write!(
        html,
        r#"<section class="cards" id="{id}"><h2>{}</h2><div class="card-track">"#,
        kind.label()
    );
    for (card, rotator) in cards.iter().zip(rotators) {
        let interval = if rotator.rotates() {
            rotator.interval().as_millis()
        } else {
            0
        };
        let _ = write!(
            html,
            r#"<article class="card" data-interval="{interval}"><div class="card-images">"#
        );
        for (i, src) in card.images.iter().enumerate() {
            let active = if i == rotator.index() { " active" } else { "" };
            let _ = write!(
                html,
                r#"<img class="card-image{active}" src="{}" alt="{}">"#,
                escape_html(src),
                escape_html(&card.alt),
            );
        }
        let _ = write!(
            html,
            r"</div><h3>{}</h3><p>{}</p></article>",
            escape_html(&card.title),
            escape_html(&card.desc),
        );
    }
    html.push_str("</div></section>\n");
}

/// Escape text for use in HTML content and quoted attributes.
fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// ── Static fragments ─────────────────────────────────────────────────

const PAGE_HEAD: &str = r##"<!DOCTYPE html>
<html lang="en"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width,initial-scale=1">
<title>{{TITLE}} | VMS</title>
<style>
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:system-ui,-apple-system,'Segoe UI',Roboto,sans-serif;color:#0a1a2f;background:#fff;line-height:1.6}
a{color:inherit}
.nav{display:flex;justify-content:space-between;align-items:center;max-width:1200px;margin:0 auto;padding:16px 24px}
.nav-logo{font-weight:800;font-size:22px;color:#13294b;text-decoration:none}
.nav-links{display:flex;gap:24px}
.nav-link{text-decoration:none;font-size:14px;color:#0a1a2f99}
.nav-link.active,.nav-link:hover{color:#13294b;font-weight:600}
.hero{position:relative;min-height:520px;display:flex;align-items:center;overflow:hidden;background:linear-gradient(120deg,#13294b,#1f4e79);color:#fff}
.slides{position:absolute;inset:0}
.slide{position:absolute;inset:0;width:100%;height:100%;object-fit:cover;opacity:0;transition:opacity .8s}
.slide.active{opacity:.55}
.hero-copy{position:relative;max-width:1200px;margin:0 auto;padding:48px 24px}
.hero-copy h1{font-size:44px;font-weight:800;line-height:1.15;max-width:760px}
.hero-copy p{font-size:18px;max-width:640px;margin:16px 0 28px;opacity:.9}
.hero-actions{display:flex;gap:12px;flex-wrap:wrap}
.hero-prev,.hero-next{position:absolute;top:50%;transform:translateY(-50%);z-index:2;background:#0006;color:#fff;border:0;font-size:28px;width:40px;height:40px;border-radius:50%;cursor:pointer}
.hero-prev{left:16px}.hero-next{right:16px}
.dots{position:absolute;bottom:18px;left:50%;transform:translateX(-50%);display:flex;gap:8px;z-index:2}
.dot{width:10px;height:10px;border-radius:50%;border:0;background:#fff6;cursor:pointer}
.dot.active{background:#facc15}
.btn{display:inline-block;padding:12px 24px;border-radius:10px;font-weight:600;text-decoration:none}
.btn-primary{background:#facc15;color:#13294b}
.btn-outline{border:1px solid #fff;color:#fff}
.cards{max-width:1200px;margin:0 auto;padding:56px 24px}
.cards h2{font-size:22px;color:#13294b;margin-bottom:16px}
.card-track{display:grid;grid-template-columns:repeat(auto-fill,minmax(240px,1fr));gap:16px}
.card{border:1px solid #e5e7eb;border-radius:12px;overflow:hidden;background:#fff}
.card-images{position:relative;height:170px;background:#f1f5f9}
.card-image{position:absolute;inset:0;width:100%;height:100%;object-fit:cover;opacity:0;transition:opacity .6s}
.card-image.active{opacity:1}
.card h3{font-size:16px;padding:12px 14px 4px;color:#13294b}
.card p{font-size:14px;padding:0 14px 14px;color:#0a1a2fcc}
.lead{background:#f8fafc;padding:64px 24px}
.lead form{max-width:760px;margin:0 auto;display:grid;grid-template-columns:1fr 1fr;gap:12px}
.lead h2{max-width:760px;margin:0 auto 16px;color:#13294b}
.lead input,.lead select,.lead textarea{width:100%;padding:10px 12px;border:1px solid #cbd5e1;border-radius:8px;font:inherit}
.lead .invalid{border-color:#dc2626;background:#fef2f2}
.lead textarea,.lead .full{grid-column:1/-1}
.lead-result{max-width:760px;margin:12px auto 0;font-weight:600}
.catalogues{background:linear-gradient(120deg,#13294b,#1f4e79);color:#fff;padding:48px 24px}
.catalogues .grid{max-width:1200px;margin:0 auto;display:grid;grid-template-columns:repeat(auto-fit,minmax(180px,1fr));gap:24px;font-size:14px}
.catalogues .label{font-weight:600;margin-bottom:6px}
.page{max-width:960px;margin:0 auto;padding:56px 24px}
.page h1{font-size:36px;color:#13294b;margin-bottom:16px}
.page h2{font-size:22px;color:#13294b;margin:32px 0 8px}
.panel{max-width:420px;margin:64px auto;padding:32px;border:1px solid #e5e7eb;border-radius:14px}
.panel input{width:100%;padding:10px 12px;margin:6px 0 14px;border:1px solid #cbd5e1;border-radius:8px;font:inherit}
.panel button,.editor button{padding:10px 20px;border:0;border-radius:8px;background:#13294b;color:#fff;font-weight:600;cursor:pointer}
.error{color:#dc2626;font-size:14px;min-height:20px}
.editor{max-width:1100px;margin:0 auto;padding:32px 24px}
.editor textarea{width:100%;min-height:480px;font:13px/1.5 ui-monospace,monospace;padding:12px;border:1px solid #cbd5e1;border-radius:8px}
.editor .toolbar{display:flex;gap:12px;align-items:center;margin:12px 0}
.footer{border-top:1px solid #e5e7eb;max-width:1200px;margin:0 auto;padding:24px;display:flex;justify-content:space-between;font-size:13px;color:#64748b}
@media(max-width:768px){.hero-copy h1{font-size:30px}.lead form{grid-template-columns:1fr}.nav-links{gap:14px}}
</style></head>
"##;

const PAGE_FOOTER: &str = r#"<footer class="footer"><span>&copy; VMS Marine Supplies</span><span>24&times;7 &middot; All Indian Ports</span></footer>
"#;

const LEAD_FORM: &str = r#"<section class="lead" id="cta">
<h2>Request a quote</h2>
<form id="lead-form" {{LEAD_RULES}} novalidate>
  <input name="name" placeholder="Name *" autocomplete="name">
  <input name="company" placeholder="Company">
  <input name="email" type="email" placeholder="Email *" autocomplete="email">
  <input name="phone" type="tel" placeholder="Phone *" autocomplete="tel">
  <input name="port" placeholder="Port">
  <select name="category">
    <option>Products</option>
    <option>Technical Services</option>
    <option>HVAC &amp; Refrigeration</option>
    <option>LSA/FFA</option>
    <option>Calibration</option>
  </select>
  <textarea name="message" rows="4" placeholder="Message"></textarea>
  <button class="btn btn-primary full" type="submit">Send request</button>
</form>
<div class="lead-result" id="lead-result" aria-live="polite"></div>
</section>
"#;

const CATALOGUES: &str = r#"<section class="catalogues" id="catalogues"><div class="grid">
<div><div class="label">About</div>Ship supplies and technical services.</div>
<div><div class="label">Catalogues</div>Products &middot; Technical Services</div>
<div id="ports"><div class="label">Ports</div>India &middot; UAE &middot; Oman</div>
<div><div class="label">Contact</div>24&times;7 &middot; All Indian Ports</div>
</div></section>
"#;

const LANDING_SCRIPT: &str = r#"<script>
(function () {
  function rotator(root, selector, onShow) {
    var items = root.querySelectorAll(selector);
    var ms = Number(root.dataset.interval) || 0;
    var index = 0;
    function show(i) {
      if (!items.length) return;
      items[index].classList.remove('active');
      index = (i + items.length) % items.length;
      items[index].classList.add('active');
      if (onShow) onShow(index);
    }
    if (items.length >= 2 && ms > 0) setInterval(function () { show(index + 1); }, ms);
    return { show: show, current: function () { return index; } };
  }

  var hero = document.getElementById('hero');
  var dots = hero.querySelectorAll('.dot');
  var carousel = rotator(hero, '.slide', function (i) {
    dots.forEach(function (d, j) { d.classList.toggle('active', i === j); });
  });
  dots.forEach(function (d) {
    d.addEventListener('click', function () { carousel.show(Number(d.dataset.go)); });
  });
  var prev = hero.querySelector('.hero-prev');
  var next = hero.querySelector('.hero-next');
  if (prev) prev.addEventListener('click', function () { carousel.show(carousel.current() - 1); });
  if (next) next.addEventListener('click', function () { carousel.show(carousel.current() + 1); });
  document.querySelectorAll('.card').forEach(function (card) { rotator(card, '.card-image'); });

  var snapshot = JSON.stringify(JSON.parse(document.getElementById('hero-config').textContent));
  function refresh() {
    fetch('/api/hero', { cache: 'no-store' })
      .then(function (r) { return r.json(); })
      .then(function (cfg) { if (JSON.stringify(cfg) !== snapshot) location.reload(); })
      .catch(function () {});
  }
  window.addEventListener('focus', refresh);
  if (window.EventSource) {
    new EventSource('/api/hero/events').addEventListener('hero-updated', refresh);
  }

  var form = document.getElementById('lead-form');
  var result = document.getElementById('lead-result');
  var rules = form.dataset;
  var emailRe = new RegExp(rules.emailPattern);
  function field(name) { return form.elements.namedItem(name); }
  function ticket() {
    var id = rules.ticketPrefix;
    for (var i = 0; i < Number(rules.ticketLength); i++) {
      id += rules.ticketAlphabet.charAt(Math.floor(Math.random() * rules.ticketAlphabet.length));
    }
    return id;
  }
  form.addEventListener('submit', function (e) {
    e.preventDefault();
    var invalid = [];
    if (!field('name').value.trim()) invalid.push('name');
    if (!emailRe.test(field('email').value)) invalid.push('email');
    if (field('phone').value.replace(/\D/g, '').length < Number(rules.minPhoneDigits)) invalid.push('phone');
    ['name', 'email', 'phone'].forEach(function (n) {
      field(n).classList.toggle('invalid', invalid.indexOf(n) !== -1);
    });
    if (invalid.length) {
      result.textContent = 'Please correct the highlighted fields.';
      return;
    }
    form.reset();
    result.textContent = 'Thank you. Your reference is ' + ticket() + '.';
  });
})();
</script>
"#;

const ABOUT_BODY: &str = r#"<article class="page">
<h1>Marine supplies and technical services, port to port</h1>
<h2>Who We Are</h2>
<p>We supply ships calling at Indian and Gulf ports with deck, engine and cabin stores, paints, safety equipment and spares, backed by a technical services team for repairs and surveys alongside.</p>
<h2>Certifications &amp; Approvals</h2>
<p>Authorised distribution for leading marine paint and safety brands. Service engineers certified for LSA/FFA inspection and calibration work.</p>
<h2>Geographic Coverage</h2>
<p>All major Indian ports, with partner coverage in the UAE and Oman. Sectors served include merchant shipping, offshore and naval.</p>
<h2>Our Promise</h2>
<p>Quotes within hours, delivery to the vessel's schedule, and one contact from enquiry to invoice.</p>
<h2>Need a quick quote or port schedule?</h2>
<p><a class="btn btn-primary" href="/#cta">Request a quote</a></p>
</article>
"#;

const LOGIN_BODY: &str = r#"<section class="panel">
<h1>Sign in</h1>
<form id="login-form" novalidate>
  <label>Email<input name="email" type="email" autocomplete="username"></label>
  <label>Password<input name="password" type="password" autocomplete="current-password"></label>
  <div class="error" id="login-error" aria-live="polite"></div>
  <button type="submit">Sign in</button>
</form>
</section>
<script>
(function () {
  var form = document.getElementById('login-form');
  var error = document.getElementById('login-error');
  form.addEventListener('submit', function (e) {
    e.preventDefault();
    error.textContent = '';
    fetch('/api/login', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({ email: form.email.value, password: form.password.value })
    })
      .then(function (r) { return r.json(); })
      .then(function (res) {
        if (!res.ok) { error.textContent = res.error; return; }
        localStorage.setItem('role', res.role);
        localStorage.setItem('email', res.email);
        location.href = res.redirect;
      })
      .catch(function () { error.textContent = 'Could not reach the server.'; });
  });
})();
</script>
"#;

const ADMIN_BODY: &str = r#"<section class="editor" id="editor" hidden>
<h1>Hero editor</h1>
<p>Edit the hero document below, or upload images to append them as slides. Changes go live when saved.</p>
<div class="toolbar">
  <input type="file" id="upload" accept="image/*" multiple>
  <button type="button" id="save">Save</button>
  <button type="button" id="reload">Reload</button>
  <button type="button" id="logout">Sign out</button>
  <span id="status" aria-live="polite"></span>
</div>
<div class="error" id="editor-error"></div>
<textarea id="doc" spellcheck="false"></textarea>
</section>
<script>
(function () {
  if (localStorage.getItem('role') !== 'admin') { location.replace('/login'); return; }
  var editor = document.getElementById('editor');
  var doc = document.getElementById('doc');
  var status = document.getElementById('status');
  var error = document.getElementById('editor-error');
  editor.hidden = false;

  function fail(msg) { error.textContent = msg; status.textContent = ''; }
  function parse() {
    try { return JSON.parse(doc.value); } catch (e) { fail('Invalid JSON: ' + e.message); return null; }
  }
  function load() {
    status.textContent = 'Loading...';
    error.textContent = '';
    fetch('/api/hero', { cache: 'no-store' })
      .then(function (r) { return r.json(); })
      .then(function (cfg) { doc.value = JSON.stringify(cfg, null, 2); status.textContent = 'Loaded'; })
      .catch(function () { fail('Failed to load the hero document.'); });
  }

  document.getElementById('save').addEventListener('click', function () {
    var cfg = parse();
    if (!cfg) return;
    status.textContent = 'Saving...';
    error.textContent = '';
    fetch('/api/hero', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify(cfg)
    })
      .then(function (r) { return r.json(); })
      .then(function (res) { if (res.ok) { status.textContent = 'Saved'; } else { fail(res.error); } })
      .catch(function () { fail('Save failed.'); });
  });

  document.getElementById('upload').addEventListener('change', function (e) {
    var cfg = parse();
    if (!cfg) return;
    var files = Array.prototype.slice.call(e.target.files);
    status.textContent = 'Uploading...';
    error.textContent = '';
    Promise.all(files.map(function (file) {
      var body = new FormData();
      body.append('file', file);
      return fetch('/api/hero/upload', { method: 'POST', body: body })
        .then(function (r) { return r.json(); })
        .then(function (res) {
          if (!res.ok) throw new Error(res.error);
          return { src: res.src, alt: file.name };
        });
    }))
      .then(function (slides) {
        cfg.slides = (cfg.slides || []).concat(slides);
        doc.value = JSON.stringify(cfg, null, 2);
        status.textContent = 'Uploaded ' + slides.length + ' image(s); save to publish';
      })
      .catch(function (err) { fail(err.message); })
      .then(function () { e.target.value = ''; });
  });

  document.getElementById('reload').addEventListener('click', load);
  document.getElementById('logout').addEventListener('click', function () {
    localStorage.removeItem('role');
    localStorage.removeItem('email');
    location.href = '/login';
  });
  load();
})();
</script>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use vms_core::hero::{HeroConfig, Slide};

    fn view_with(slides: usize, products: usize) -> PublicView {
        let config = HeroConfig {
            slides: (0..slides)
                .map(|i| Slide::with_alt(format!("/uploads/{i}.jpg"), format!("slide {i}")))
                .collect(),
            products: (0..products)
                .map(|i| Card {
                    title: format!("Product {i}"),
                    images: vec!["/uploads/a.png".to_owned(), "/uploads/b.png".to_owned()],
                    ..Card::default()
                })
                .collect(),
            ..HeroConfig::default()
        };
        PublicView::new(config)
    }

    #[test]
    fn hero_interval_only_with_two_or_more_slides() {
        assert!(render_landing(&view_with(3, 0)).contains(r#"id="hero" data-interval="6000""#));
        assert!(render_landing(&view_with(1, 0)).contains(r#"id="hero" data-interval="0""#));
        assert!(!render_landing(&view_with(1, 0)).contains("class=\"dots\""));
    }

    #[test]
    fn card_rotators_are_staggered() {
        let html = render_landing(&view_with(0, 2));
        assert!(html.contains(r#"<article class="card" data-interval="3000">"#));
        assert!(html.contains(r#"<article class="card" data-interval="3500">"#));
        assert!(!html.contains(r#"id="technicalServices""#));
    }

    #[test]
    fn content_is_escaped() {
        let mut view = view_with(0, 0);
        view.config.title = "<script>alert('x')</script>".to_owned();
        view.config.button1.href = "\"><img>".to_owned();
        let html = render_landing(&view);
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(html.contains("&quot;&gt;&lt;img&gt;"));
    }

    #[test]
    fn embedded_snapshot_cannot_close_the_script_tag() {
        let mut view = view_with(0, 0);
        view.config.subtitle = "</script><b>".to_owned();
        let html = render_landing(&view);
        assert!(html.contains(r"<\/script><b>"));
    }

    #[test]
    fn lead_form_is_checked_in_the_browser() {
        let html = render_landing(&view_with(0, 0));
        assert!(html.contains(r#"data-email-pattern="^[^\s@]+@[^\s@]+\.[^\s@]+$""#));
        assert!(html.contains(r#"data-min-phone-digits="8""#));
        assert!(html.contains(r#"data-ticket-prefix="VMS-" data-ticket-length="5""#));
        assert!(!html.contains("{{LEAD_RULES}}"));
        assert!(!html.contains("/api/leads"));
        assert!(!html.contains("FormData"));
    }

    #[test]
    fn shell_marks_active_nav_item() {
        let html = page_shell("About", "about", ABOUT_BODY);
        assert!(html.contains(r#"<a href="/about" class="nav-link active">About</a>"#));
        assert!(html.contains("<title>About | VMS</title>"));
    }
}
