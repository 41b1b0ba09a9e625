use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::carousel::{Carousel, NavKey};
use crate::chart::ChartJsAdapter;
use crate::chat::ChatWidget;
use crate::config::DashboardConfig;
use crate::model::Credentials;
use crate::scorecard::ScorecardRenderer;
use crate::session::{DashboardBackend, LoginOutcome, SessionController, SessionView};

/// Everything the page can poke at. One instance per process, one student
/// session per instance.
pub struct DashboardState {
    pub session: tokio::sync::Mutex<SessionController>,
    pub carousel: Mutex<Carousel>,
    pub chat: Mutex<ChatWidget>,
    pub chart: Arc<ChartJsAdapter>,
}

impl DashboardState {
    pub fn new(backend: Arc<dyn DashboardBackend>, config: &DashboardConfig) -> Self {
        let chart = Arc::new(ChartJsAdapter::new(config.ring.max));
        let renderer = ScorecardRenderer::new(config.ring, chart.clone());

        DashboardState {
            session: tokio::sync::Mutex::new(SessionController::new(backend, renderer)),
            carousel: Mutex::new(Carousel::default()),
            chat: Mutex::new(ChatWidget::with_delay(config.reply_delay)),
            chart,
        }
    }
}

#[derive(Serialize)]
struct LoginResponse {
    outcome: LoginOutcome,
    session: SessionView,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Deserialize)]
struct ChatRequest {
    text: String,
}

#[derive(Deserialize)]
struct KeyRequest {
    key: String,
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().body("Scorecard dashboard is running!")
}

async fn get_session(state: web::Data<DashboardState>) -> HttpResponse {
    let session = state.session.lock().await;
    HttpResponse::Ok().json(session.view())
}

async fn login(
    state: web::Data<DashboardState>,
    credentials: web::Json<Credentials>,
) -> HttpResponse {
    let mut session = state.session.lock().await;
    let outcome = session.submit(&credentials).await;
    HttpResponse::Ok().json(LoginResponse {
        outcome,
        session: session.view(),
    })
}

async fn logout(state: web::Data<DashboardState>) -> HttpResponse {
    let mut session = state.session.lock().await;
    session.logout().await;
    state.chart.clear();
    HttpResponse::Ok().json(session.view())
}

async fn get_chart(state: web::Data<DashboardState>) -> HttpResponse {
    match state.chart.latest() {
        Some(config) => HttpResponse::Ok().json(config),
        None => HttpResponse::NotFound().json(ErrorResponse {
            error: "No chart rendered yet".to_string(),
        }),
    }
}

async fn current_testimonial(state: web::Data<DashboardState>) -> HttpResponse {
    HttpResponse::Ok().json(state.carousel.lock().view())
}

async fn next_testimonial(state: web::Data<DashboardState>) -> HttpResponse {
    let mut carousel = state.carousel.lock();
    carousel.next();
    HttpResponse::Ok().json(carousel.view())
}

async fn prev_testimonial(state: web::Data<DashboardState>) -> HttpResponse {
    let mut carousel = state.carousel.lock();
    carousel.prev();
    HttpResponse::Ok().json(carousel.view())
}

async fn testimonial_key(state: web::Data<DashboardState>, req: web::Json<KeyRequest>) -> HttpResponse {
    let mut carousel = state.carousel.lock();
    carousel.handle_key(NavKey::from_key_name(&req.key));
    HttpResponse::Ok().json(carousel.view())
}

async fn get_chat(state: web::Data<DashboardState>) -> HttpResponse {
    HttpResponse::Ok().json(state.chat.lock().view())
}

async fn post_chat(state: web::Data<DashboardState>, req: web::Json<ChatRequest>) -> HttpResponse {
    let chat = state.chat.lock();
    // Reply task is detached; the page polls GET /chat for it
    if chat.submit(&req.text).is_none() {
        log::debug!("Ignoring blank chat message");
    }
    HttpResponse::Ok().json(chat.view())
}

async fn open_chat(state: web::Data<DashboardState>) -> HttpResponse {
    let mut chat = state.chat.lock();
    chat.open();
    HttpResponse::Ok().json(chat.view())
}

async fn close_chat(state: web::Data<DashboardState>) -> HttpResponse {
    let mut chat = state.chat.lock();
    chat.close();
    HttpResponse::Ok().json(chat.view())
}

async fn chat_key(state: web::Data<DashboardState>, req: web::Json<KeyRequest>) -> HttpResponse {
    let mut chat = state.chat.lock();
    chat.handle_key(&req.key);
    HttpResponse::Ok().json(chat.view())
}

async fn serve_homepage() -> HttpResponse {
    HttpResponse::Ok().content_type("text/html").body(HOMEPAGE)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(serve_homepage))
        .route("/health", web::get().to(health_check))
        .route("/session", web::get().to(get_session))
        .route("/session/login", web::post().to(login))
        .route("/session/logout", web::post().to(logout))
        .route("/chart", web::get().to(get_chart))
        .route("/testimonials/current", web::get().to(current_testimonial))
        .route("/testimonials/next", web::post().to(next_testimonial))
        .route("/testimonials/prev", web::post().to(prev_testimonial))
        .route("/testimonials/key", web::post().to(testimonial_key))
        .route("/chat", web::get().to(get_chat))
        .route("/chat", web::post().to(post_chat))
        .route("/chat/open", web::post().to(open_chat))
        .route("/chat/close", web::post().to(close_chat))
        .route("/chat/key", web::post().to(chat_key));
}

pub async fn start_server(config: &DashboardConfig, state: DashboardState) -> std::io::Result<()> {
    let state = web::Data::new(state);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

const HOMEPAGE: &str = r##"<!DOCTYPE html>
<html>
<head>
    <title>Student Scorecard</title>
    <script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
    <style>
        body { font-family: Arial, sans-serif; max-width: 900px; margin: 40px auto; padding: 20px; }
        .hidden { display: none; }
        .error { color: #b91c1c; }
        .shaded { background: #eff6ff; }
        table { width: 100%; border-collapse: collapse; }
        td, th { padding: 6px; text-align: center; }
        #chatWindow { position: fixed; bottom: 80px; right: 20px; width: 300px; background: white;
                      border: 1px solid #ddd; border-radius: 8px; padding: 10px; flex-direction: column; }
        #chatMessages { display: flex; flex-direction: column; gap: 6px; max-height: 240px; overflow-y: auto; }
        .user { align-self: flex-end; background: #3b82f6; color: white; border-radius: 8px; padding: 4px 8px; }
        .assistant { align-self: flex-start; background: #dbeafe; border-radius: 8px; padding: 4px 8px; }
        #chatBtn { position: fixed; bottom: 20px; right: 20px; }
    </style>
</head>
<body>
    <section id="login">
        <h1>Student Scorecard</h1>
        <form id="loginForm">
            <input name="username" placeholder="Username" required>
            <input name="password" type="password" placeholder="Password" required>
            <select name="current_semester">
                <option>1</option><option>2</option><option>3</option><option>4</option>
                <option>5</option><option>6</option><option>7</option><option>8</option>
            </select>
            <button id="loginBtn" type="submit">Login</button>
        </form>
        <p id="errorMsg" class="error hidden" tabindex="-1"></p>
    </section>
    <section id="scorecard" class="hidden"></section>
    <section id="testimonialCarousel" tabindex="0">
        <p id="testimonialText"></p><p id="testimonialAuthor"></p>
        <button onclick="moveTestimonial('prev')">&larr;</button>
        <button onclick="moveTestimonial('next')">&rarr;</button>
    </section>

    <button id="chatBtn" onclick="toggleChat('open')">Chat</button>
    <div id="chatWindow" class="hidden">
        <button onclick="toggleChat('close')" aria-label="Close chat">&times;</button>
        <div id="chatMessages"></div>
        <form id="chatForm"><input id="chatInput" autocomplete="off"><button type="submit">Send</button></form>
    </div>

    <script>
        async function showSession(view) {
            const btn = document.getElementById('loginBtn');
            btn.disabled = !view.login.submit_enabled;
            btn.textContent = view.login.submit_label;
            const err = document.getElementById('errorMsg');
            err.textContent = view.login.error || '';
            err.classList.toggle('hidden', !view.login.error);
            if (view.login.focus_error) err.focus();
            document.getElementById('login').classList.toggle('hidden', view.authenticated);
            const sc = document.getElementById('scorecard');
            sc.classList.toggle('hidden', !view.authenticated);
            if (!view.scorecard) { sc.innerHTML = ''; return; }
            const s = view.scorecard;
            const ring = s.summary.ring;
            const size = 2 * (s.summary.radius + s.summary.stroke);
            const pairs = subs => subs.map(p => `${p.subject}: <b>${p.mark ?? ''}</b>`).join('<br>');
            sc.innerHTML = `
                <h2>${s.greeting}</h2><button onclick="logout()">Logout</button>
                <h3>Subjects &amp; Marks (Latest Semester)</h3><p>${pairs(s.latest.subjects)}</p>
                <p>Total: ${s.latest.total} / ${s.latest.out_of}</p>
                <svg width="${size}" height="${size}">
                <circle cx="${size / 2}" cy="${size / 2}" r="${s.summary.radius}" stroke="#e5e7eb"
                    stroke-width="${s.summary.stroke}" fill="none"/>
                <circle cx="${size / 2}" cy="${size / 2}" r="${s.summary.radius}" stroke="${ring.stroke_color}"
                    stroke-width="${s.summary.stroke}" fill="none" stroke-linecap="round"
                    stroke-dasharray="${ring.circumference}" stroke-dashoffset="${ring.dash_offset}"/>
                <text x="50%" y="50%" text-anchor="middle" dy=".3em">${s.summary.sgpa}</text></svg>
                <p style="color:${ring.stroke_color}">${s.summary.motivation}</p>
                <table><tr><th>Semester</th><th>SGPA</th><th>Subjects &amp; Marks</th><th>Total</th></tr>
                ${s.history.map(r => `<tr class="${r.band}"><td>${r.label}</td><td>${r.sgpa}</td>
                    <td>${pairs(r.subjects)}</td><td>${r.total} / ${r.out_of}</td></tr>`).join('')}</table>
                <canvas id="growthChart" height="120"></canvas>`;
            const chart = await fetch('/chart');
            if (chart.ok) {
                new Chart(document.getElementById('growthChart'), await chart.json());
            }
            if (view.notification) alert(view.notification);
        }

        document.getElementById('loginForm').addEventListener('submit', async (e) => {
            e.preventDefault();
            const form = new FormData(e.target);
            const res = await fetch('/session/login', {
                method: 'POST', headers: {'Content-Type': 'application/json'},
                body: JSON.stringify({ username: form.get('username'), password: form.get('password'),
                                       current_semester: parseInt(form.get('current_semester')) })
            });
            showSession((await res.json()).session);
        });

        async function logout() {
            const res = await fetch('/session/logout', { method: 'POST' });
            showSession(await res.json());
        }

        function showTestimonial(view) {
            document.getElementById('testimonialText').textContent = view.testimonial.text;
            document.getElementById('testimonialAuthor').textContent = view.testimonial.author;
        }

        async function moveTestimonial(dir) {
            const res = await fetch(dir ? `/testimonials/${dir}` : '/testimonials/current',
                                    { method: dir ? 'POST' : 'GET' });
            showTestimonial(await res.json());
        }

        async function postKey(url, key) {
            const res = await fetch(url, {
                method: 'POST', headers: {'Content-Type': 'application/json'},
                body: JSON.stringify({ key })
            });
            return res.json();
        }

        document.getElementById('testimonialCarousel').addEventListener('keydown', async (e) => {
            if (e.key === 'ArrowLeft' || e.key === 'ArrowRight') {
                showTestimonial(await postKey('/testimonials/key', e.key));
            }
        });

        function showChat(view) {
            const win = document.getElementById('chatWindow');
            win.classList.toggle('hidden', !view.open);
            win.style.display = view.open ? 'flex' : '';
            const box = document.getElementById('chatMessages');
            box.innerHTML = '';
            view.messages.forEach(m => {
                const div = document.createElement('div');
                div.className = m.origin;
                div.textContent = m.text;
                box.appendChild(div);
            });
            box.scrollTop = box.scrollHeight;
            if (view.open) document.getElementById('chatInput').focus();
            else document.getElementById('chatBtn').focus();
        }

        async function toggleChat(action) {
            const res = await fetch(`/chat/${action}`, { method: 'POST' });
            showChat(await res.json());
        }

        document.getElementById('chatWindow').addEventListener('keydown', async (e) => {
            if (e.key === 'Escape') showChat(await postKey('/chat/key', e.key));
        });

        document.getElementById('chatForm').addEventListener('submit', async (e) => {
            e.preventDefault();
            const input = document.getElementById('chatInput');
            const res = await fetch('/chat', {
                method: 'POST', headers: {'Content-Type': 'application/json'},
                body: JSON.stringify({ text: input.value })
            });
            input.value = '';
            showChat(await res.json());
            setTimeout(async () => showChat(await (await fetch('/chat')).json()), 800);
        });

        fetch('/session').then(r => r.json()).then(showSession);
        moveTestimonial(null);
    </script>
</body>
</html>
"##;
