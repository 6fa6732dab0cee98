use crate::AppState;
use axum::{extract::Extension, response::Html, routing::get, Router};
use std::sync::Arc;

pub fn ui_routes() -> Router {
    Router::new().route("/", get(studio_page))
}

/// The page starts out on the deployment's configured default style.
pub async fn studio_page(Extension(state): Extension<Arc<AppState>>) -> Html<String> {
    let default_style = serde_json::Value::from(state.config.generation.default_style.as_str())
        .to_string()
        .replace("</", "<\\/");
    Html(STUDIO_HTML.replace("__DEFAULT_STYLE__", &default_style))
}

const STUDIO_HTML: &str = r###"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Blog Header Studio</title>
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; max-width: 960px; margin: 0 auto; padding: 24px; line-height: 1.5; }
        section { margin: 1.5rem 0; }
        input[type=text] { width: 100%; padding: 0.5rem; box-sizing: border-box; }
        button { padding: 0.5rem 1rem; margin: 0.25rem 0.25rem 0.25rem 0; }
        button.preset.active { outline: 2px solid #007bff; }
        .error { color: #dc3545; }
        .note { color: #6c757d; font-size: 0.9rem; }
        img { max-width: 100%; border-radius: 6px; }
        .hidden { display: none; }
    </style>
</head>
<body>
    <h1>Blog Header Studio</h1>

    <section>
        <label for="url">YouTube URL</label>
        <input id="url" type="text" placeholder="https://www.youtube.com/watch?v=...">
        <button id="fetch">Fetch video</button>
    </section>

    <section id="video" class="hidden">
        <h2 id="title"></h2>
        <p id="author" class="note"></p>
        <img id="thumbnail" alt="Video thumbnail">
        <p id="transcript-status" class="note"></p>
    </section>

    <section>
        <h3>Style</h3>
        <div id="presets">
            <button class="preset" data-style="modern, clean, professional">Modern</button>
            <button class="preset" data-style="vibrant, colorful, energetic">Vibrant</button>
            <button class="preset" data-style="minimalist, flat design, pastel colors">Minimalist</button>
            <button class="preset" data-style="dark, moody, cinematic lighting">Cinematic</button>
        </div>
        <input id="custom-style" type="text" placeholder="Or describe your own style">
    </section>

    <section>
        <button id="generate" disabled>Generate image</button>
        <button id="regenerate" disabled>Regenerate</button>
        <button id="download" disabled>Download</button>
    </section>

    <section>
        <label for="timestamp">Enhance a frame at (MM:SS)</label>
        <input id="timestamp" type="text" placeholder="0:00">
        <button id="enhance" disabled>Enhance from frame</button>
        <p id="frame-note" class="note"></p>
    </section>

    <p id="error" class="error"></p>

    <section id="result" class="hidden">
        <img id="image" alt="Generated header">
        <p id="prompt" class="note"></p>
    </section>

    <script>
        const state = { video: null, style: __DEFAULT_STYLE__, imageData: null, busy: {} };
        const $ = (id) => document.getElementById(id);

        async function post(path, body) {
            const response = await fetch(path, {
                method: 'POST',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify(body),
            });
            // Extractor rejections come back as plain text, not JSON
            const raw = await response.text();
            let data = null;
            try {
                data = JSON.parse(raw);
            } catch (_) {
                data = null;
            }
            if (!response.ok) {
                throw new Error((data && data.error) || raw || 'Request failed');
            }
            if (data === null) {
                throw new Error('Unexpected response from server');
            }
            return data;
        }

        // One in-flight request per action; the triggering control stays disabled meanwhile.
        async function run(action, button, work) {
            if (state.busy[action]) return;
            state.busy[action] = true;
            button.disabled = true;
            $('error').textContent = '';
            try {
                await work();
            } catch (err) {
                $('error').textContent = err.message;
            } finally {
                state.busy[action] = false;
                refresh();
            }
        }

        function refresh() {
            const hasVideo = state.video !== null;
            $('fetch').disabled = !!state.busy.fetch;
            $('generate').disabled = !hasVideo || !!state.busy.generate;
            $('regenerate').disabled = !hasVideo || !state.imageData || !!state.busy.generate;
            $('enhance').disabled = !hasVideo || !!state.busy.enhance;
            $('download').disabled = !state.imageData;
            document.querySelectorAll('.preset').forEach((b) => {
                b.classList.toggle('active', b.dataset.style === state.style);
            });
        }

        function showImage(result) {
            state.imageData = result.imageData;
            $('image').src = result.imageData;
            $('prompt').textContent = result.imagePrompt;
            $('result').classList.remove('hidden');
        }

        $('fetch').addEventListener('click', () => run('fetch', $('fetch'), async () => {
            const video = await post('/api/youtube', { url: $('url').value });
            state.video = video;
            $('title').textContent = video.title;
            $('author').textContent = 'by ' + video.author;
            $('thumbnail').src = video.thumbnailUrl;
            $('transcript-status').textContent = video.transcript
                ? 'Transcript loaded (' + video.transcript.length + ' characters)'
                : 'No transcript available';
            $('video').classList.remove('hidden');
        }));

        document.querySelectorAll('.preset').forEach((button) => {
            button.addEventListener('click', () => {
                state.style = button.dataset.style;
                $('custom-style').value = '';
                refresh();
            });
        });

        $('custom-style').addEventListener('input', (event) => {
            state.style = event.target.value;
            refresh();
        });

        const generate = (button) => run('generate', button, async () => {
            const result = await post('/api/generate', {
                title: state.video.title,
                transcript: state.video.transcript,
                style: state.style,
            });
            showImage(result);
        });
        $('generate').addEventListener('click', () => generate($('generate')));
        $('regenerate').addEventListener('click', () => generate($('regenerate')));

        $('enhance').addEventListener('click', () => run('enhance', $('enhance'), async () => {
            const frame = await post('/api/frame', {
                videoId: state.video.videoId,
                timestamp: $('timestamp').value || '0:00',
            });
            $('frame-note').textContent = frame.note || 'Frame extracted';
            const result = await post('/api/generate-enhanced', {
                title: state.video.title,
                transcript: state.video.transcript,
                style: state.style,
                sourceImage: frame.frameData,
                mode: 'enhance',
            });
            showImage(result);
        }));

        $('download').addEventListener('click', () => {
            if (!state.imageData) return;
            const link = document.createElement('a');
            link.href = state.imageData;
            link.download = 'blog-header-' + Date.now() + '.png';
            document.body.appendChild(link);
            link.click();
            link.remove();
        });

        if (![...document.querySelectorAll('.preset')].some((b) => b.dataset.style === state.style)) {
            $('custom-style').value = state.style;
        }
        refresh();
    </script>
</body>
</html>
"###;
