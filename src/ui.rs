use crate::goal::DEFAULT_GOAL;
use crate::models::TrackerSummary;

pub fn render_index(summary: &TrackerSummary) -> String {
    let goal_input = summary.goal.unwrap_or(DEFAULT_GOAL);
    let goal_label = summary
        .goal
        .filter(|_| !summary.amounts.is_empty())
        .map(|goal| goal.to_string())
        .unwrap_or_else(|| "--".to_owned());

    INDEX_HTML
        .replace("{{GOAL_INPUT}}", &goal_input.to_string())
        .replace("{{GOAL}}", &goal_label)
        .replace("{{SAVED}}", &summary.saved_total.to_string())
        .replace("{{REMAINING}}", &summary.remaining.to_string())
        .replace("{{PROGRESS}}", &format!("{:.1}", summary.progress))
        .replace("{{DAYS}}", &summary.saved_days.to_string())
        .replace("{{CELLS}}", &render_cells(summary))
}

fn render_cells(summary: &TrackerSummary) -> String {
    if summary.amounts.is_empty() {
        return r#"<p class="empty">Pick a goal and generate your 365 circles.</p>"#.to_owned();
    }

    let mut html = String::with_capacity(summary.amounts.len() * 96);
    for (index, amount) in summary.amounts.iter().enumerate() {
        let class = if summary.selected.binary_search(&index).is_ok() {
            "cell saved"
        } else {
            "cell"
        };
        html.push_str(&format!(
            r#"<button class="{class}" type="submit" formaction="/toggle/{index}" data-index="{index}">{amount}</button>"#
        ));
    }
    html
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>365-Day Savings Tracker</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(1080px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    .subtitle {
      margin: 6px 0 0;
      color: #5f5c57;
    }

    .goal-form {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
      align-items: center;
    }

    .goal-form input {
      border: 1px solid rgba(47, 72, 88, 0.2);
      border-radius: 999px;
      padding: 14px 18px;
      font: inherit;
      width: 180px;
    }

    button.primary {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 14px 20px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
      box-shadow: 0 10px 24px rgba(255, 107, 74, 0.3);
    }

    button.secondary {
      background: var(--accent-2);
      box-shadow: 0 10px 24px rgba(47, 72, 88, 0.3);
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .stat .value {
      font-size: 1.6rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(46px, 1fr));
      gap: 8px;
    }

    .cell {
      aspect-ratio: 1;
      border-radius: 50%;
      border: 2px solid rgba(47, 72, 88, 0.2);
      background: white;
      color: var(--accent-2);
      font: inherit;
      font-size: 0.85rem;
      font-weight: 600;
      cursor: pointer;
      transition: transform 120ms ease, background 120ms ease;
    }

    .cell:active {
      transform: scale(0.94);
    }

    .cell.saved {
      background: var(--accent);
      border-color: var(--accent);
      color: white;
    }

    .empty {
      color: #6f6a65;
      margin: 0;
    }

    .status {
      font-size: 0.95rem;
      color: #6b645d;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>365-Day Savings Tracker</h1>
      <p class="subtitle">Choose a yearly goal between 1825 and 36500 (multiple of 5). Tap a circle each day you save that amount.</p>
    </header>

    <form class="goal-form" id="goal-form" method="post" action="/generate">
      <input id="goal-input" name="goal" inputmode="numeric" value="{{GOAL_INPUT}}" />
      <button class="primary" type="submit">Generate</button>
      <button class="primary secondary" id="clear-btn" type="submit" formaction="/clear">Clear saved</button>
    </form>

    <section class="panel">
      <div class="stat">
        <span class="label">Goal</span>
        <span id="goal" class="value">{{GOAL}}</span>
      </div>
      <div class="stat">
        <span class="label">Saved</span>
        <span id="saved" class="value">{{SAVED}}</span>
      </div>
      <div class="stat">
        <span class="label">Remaining</span>
        <span id="remaining" class="value">{{REMAINING}}</span>
      </div>
      <div class="stat">
        <span class="label">Progress</span>
        <span id="progress" class="value">{{PROGRESS}}%</span>
      </div>
      <div class="stat">
        <span class="label">Days saved</span>
        <span id="days" class="value">{{DAYS}}</span>
      </div>
    </section>

    <form method="post" class="grid" id="grid">{{CELLS}}</form>

    <div class="status" id="status"></div>
  </main>

  <script>
    const goalForm = document.getElementById('goal-form');
    const goalInput = document.getElementById('goal-input');
    const clearBtn = document.getElementById('clear-btn');
    const gridEl = document.getElementById('grid');
    const statusEl = document.getElementById('status');

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const renderCells = (data) => {
      if (!data.amounts.length) {
        gridEl.innerHTML = '<p class="empty">Pick a goal and generate your 365 circles.</p>';
        return;
      }
      const selected = new Set(data.selected);
      gridEl.innerHTML = data.amounts
        .map((amount, index) => {
          const cls = selected.has(index) ? 'cell saved' : 'cell';
          return `<button class="${cls}" type="submit" formaction="/toggle/${index}" data-index="${index}">${amount}</button>`;
        })
        .join('');
    };

    const updateUI = (data) => {
      const generated = data.amounts.length > 0;
      document.getElementById('goal').textContent = generated ? data.goal : '--';
      document.getElementById('saved').textContent = data.saved_total;
      document.getElementById('remaining').textContent = data.remaining;
      document.getElementById('progress').textContent = `${data.progress.toFixed(1)}%`;
      document.getElementById('days').textContent = data.saved_days;
      renderCells(data);
    };

    const post = async (url, body) => {
      const res = await fetch(url, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(body || {})
      });
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      updateUI(await res.json());
    };

    goalInput.addEventListener('input', () => {
      const digits = goalInput.value.replace(/\D/g, '').replace(/^0+(?=\d)/, '');
      if (digits !== goalInput.value) {
        goalInput.value = digits;
      }
    });

    goalForm.addEventListener('submit', (event) => {
      event.preventDefault();
      const action = event.submitter === clearBtn ? '/api/clear' : '/api/generate';
      const body = action === '/api/generate' ? { goal: goalInput.value } : {};
      post(action, body)
        .then(() => setStatus(action === '/api/generate' ? 'New circles generated' : 'Cleared', 'ok'))
        .catch((err) => setStatus(err.message, 'error'));
    });

    gridEl.addEventListener('submit', (event) => {
      event.preventDefault();
      const cell = event.submitter;
      if (!cell || cell.dataset.index === undefined) {
        return;
      }
      post('/api/toggle', { index: Number(cell.dataset.index) })
        .then(() => setStatus('', ''))
        .catch((err) => setStatus(err.message, 'error'));
    });
  </script>
</body>
</html>
"#;
