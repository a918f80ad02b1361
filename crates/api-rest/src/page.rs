//! Embedded single-page form.
//!
//! Served at `/`. The page presents the six clinical inputs with their
//! declared defaults and bounds, posts them as JSON to `/predict`, and
//! renders one of the two result branches.

/// The complete form page, embedded at compile time.
pub const FORM_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>CHD Risk Prediction</title>
  <style>
    body { font-family: system-ui, sans-serif; max-width: 640px; margin: 2rem auto; padding: 0 1rem; color: #222; }
    h1 { font-size: 1.5rem; }
    form { display: grid; grid-template-columns: 1fr 1fr; gap: 0.75rem 1.5rem; }
    label { display: flex; flex-direction: column; font-size: 0.9rem; gap: 0.25rem; }
    input, select { padding: 0.4rem; font-size: 1rem; }
    button { grid-column: 1 / -1; padding: 0.6rem; font-size: 1rem; cursor: pointer; }
    #result { margin-top: 1.5rem; padding: 1rem; border-radius: 6px; display: none; }
    #result.elevated { display: block; background: #fdecea; border: 1px solid #c0392b; }
    #result.low { display: block; background: #eafaf1; border: 1px solid #1e8449; }
    #result.error { display: block; background: #fef9e7; border: 1px solid #b7950b; }
    #advice { font-style: italic; }
  </style>
</head>
<body>
  <h1>CHD risk prediction</h1>
  <p>Enter the clinical parameters and submit to estimate the risk of coronary heart disease.</p>
  <form id="form">
    <label>Systolic blood pressure (sbp)
      <input name="sbp" type="number" value="130" min="80" max="250" step="1" required>
    </label>
    <label>Family history
      <select name="famhist">
        <option value="Present" selected>Present</option>
        <option value="Absent">Absent</option>
      </select>
    </label>
    <label>LDL cholesterol
      <input name="ldl" type="number" value="4.00" step="0.01" required>
    </label>
    <label>Obesity
      <input name="obesity" type="number" value="25.00" step="0.01" required>
    </label>
    <label>Adiposity
      <input name="adiposity" type="number" value="25.00" step="0.01" required>
    </label>
    <label>Age
      <input name="age" type="number" value="45" min="15" max="100" step="1" required>
    </label>
    <button type="submit">Run prediction</button>
  </form>
  <div id="result">
    <p><strong id="verdict"></strong></p>
    <p>Estimated probability: <strong id="probability"></strong></p>
    <p id="advice"></p>
  </div>
  <script>
    const form = document.getElementById('form');
    const result = document.getElementById('result');
    form.addEventListener('submit', async (event) => {
      event.preventDefault();
      const data = new FormData(form);
      const body = {
        sbp: parseInt(data.get('sbp'), 10),
        ldl: parseFloat(data.get('ldl')),
        adiposity: parseFloat(data.get('adiposity')),
        famhist: data.get('famhist'),
        obesity: parseFloat(data.get('obesity')),
        age: parseInt(data.get('age'), 10),
      };
      try {
        const res = await fetch('/predict', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify(body),
        });
        const json = await res.json();
        if (!res.ok) {
          result.className = 'error';
          document.getElementById('verdict').textContent = 'Error';
          document.getElementById('probability').textContent = '';
          document.getElementById('advice').textContent = json.message || 'Prediction failed.';
          return;
        }
        result.className = json.label === 1 ? 'elevated' : 'low';
        document.getElementById('verdict').textContent = json.verdict;
        document.getElementById('probability').textContent = json.probability_pct;
        document.getElementById('advice').textContent = json.advice || '';
      } catch (err) {
        result.className = 'error';
        document.getElementById('verdict').textContent = 'Error';
        document.getElementById('probability').textContent = '';
        document.getElementById('advice').textContent = String(err);
      }
    });
  </script>
</body>
</html>
"#;
