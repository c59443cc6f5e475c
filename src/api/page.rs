//! The single-page form served at `/`.
//!
//! The page builds its inputs from `GET /api/form/defaults`, keeps the
//! edited record in one JS object, and posts it to the analyze endpoint.
//! Assembly, clamping and report preparation all happen server-side.

use axum::response::Html;

/// `GET /`
pub async fn form_page() -> Html<&'static str> {
    Html(FORM_PAGE_HTML)
}

const FORM_PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Drug Risk Assessment</title>
  <style>
    * { box-sizing: border-box; }
    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', system-ui, sans-serif;
      background: #fafaf9; color: #1c1917; margin: 0; padding: 24px;
    }
    main { max-width: 960px; margin: 0 auto; }
    h1 { font-size: 24px; margin-bottom: 4px; }
    h2 { font-size: 18px; margin-top: 32px; }
    p.lead { color: #78716c; font-size: 14px; margin-top: 0; }
    fieldset {
      border: 1px solid #d6d3d1; border-radius: 12px; margin: 12px 0; padding: 12px 16px;
      display: grid; grid-template-columns: repeat(auto-fill, minmax(200px, 1fr)); gap: 12px;
    }
    fieldset > fieldset, fieldset > .group-list, fieldset > .btn { grid-column: 1 / -1; }
    legend { font-weight: 600; padding: 0 4px; }
    label { display: flex; flex-direction: column; font-size: 13px; color: #44403c; gap: 4px; }
    input, select {
      font-size: 14px; padding: 6px 8px; border: 1px solid #d6d3d1; border-radius: 8px;
    }
    .group-item {
      border: 1px dashed #d6d3d1; border-radius: 8px; padding: 8px; margin-bottom: 8px;
      display: grid; grid-template-columns: repeat(auto-fill, minmax(180px, 1fr)); gap: 8px;
    }
    .btn {
      padding: 8px 16px; border-radius: 8px; font-size: 14px; cursor: pointer;
      border: 1px solid #d6d3d1; background: white; color: #44403c; justify-self: start;
    }
    .btn-primary {
      background: #4a7c59; color: white; border: none; font-size: 16px; padding: 14px 28px;
    }
    .btn:disabled { opacity: 0.5; cursor: not-allowed; }
    .status { margin-top: 16px; }
    .status.error { color: #dc2626; }
    .metrics { display: flex; gap: 24px; flex-wrap: wrap; }
    .metric { background: white; border: 1px solid #e7e5e4; border-radius: 12px; padding: 12px 20px; }
    .metric .value { font-size: 28px; font-weight: 600; }
    .band-low .value { color: #16a34a; }
    .band-moderate .value { color: #d97706; }
    .band-high .value { color: #dc2626; }
    .bar-row { display: flex; align-items: center; gap: 8px; margin: 4px 0; font-size: 13px; }
    .bar-label { width: 180px; }
    .bar-track { flex: 1; height: 12px; background: #e7e5e4; border-radius: 6px; overflow: hidden; }
    .bar-fill { height: 100%; background: #4a7c59; }
    .bar-fill.alt { background: #78716c; }
    table { border-collapse: collapse; width: 100%; font-size: 13px; background: white; }
    th, td { border: 1px solid #e7e5e4; padding: 6px 8px; text-align: left; }
    th { background: #f5f5f4; }
    #result { display: none; }
  </style>
</head>
<body>
  <main>
    <h1>Drug Risk Assessment</h1>
    <p class="lead">Enter the patient's details and the proposed drug, then run the analysis.</p>

    <form id="patient-form" onsubmit="return false"></form>

    <button class="btn btn-primary" id="btn-analyze" disabled>Analyze Risk</button>
    <div class="status" id="status"></div>

    <section id="result"></section>
  </main>

  <script>
    var ENUM_KEYS = {
      sex: 'sex', pregnancy_status: 'pregnancy_status', smoking_status: 'smoking_status',
      severity: 'severity', route: 'route'
    };
    var INT_KEYS = [
      'age', 'pack_years', 'units_per_week', 'systolic', 'diastolic',
      'heart_rate_bpm', 'age_at_diagnosis', 'frequency_per_day'
    ];
    var NULLABLE_KEYS = ['ethnicity', 'pregnancy_status', 'type', 'date'];
    var DATE_RE = /^\d{4}-\d{2}-\d{2}$/;

    var formEl = document.getElementById('patient-form');
    var btnAnalyze = document.getElementById('btn-analyze');
    var statusEl = document.getElementById('status');
    var resultEl = document.getElementById('result');

    var sessionId = null;
    var model = null;
    var templates = null;
    var choices = null;
    var busy = false;

    function el(tag, cls, text) {
      var node = document.createElement(tag);
      if (cls) node.className = cls;
      if (text !== undefined) node.textContent = text;
      return node;
    }

    function labelFor(key) {
      return key.replace(/_/g, ' ');
    }

    function showStatus(message, kind) {
      statusEl.textContent = message;
      statusEl.className = 'status ' + (kind || '');
    }

    function input(obj, key, parentKey) {
      var wrap = el('label', null, labelFor(key));
      var value = obj[key];
      var nullable = NULLABLE_KEYS.indexOf(key) >= 0;
      var choiceKey = (parentKey === 'alcohol_use' && key === 'status') ? 'alcohol_status' : ENUM_KEYS[key];
      var ctl;

      if (choiceKey) {
        ctl = el('select');
        if (nullable) ctl.appendChild(el('option', null, ''));
        choices[choiceKey].forEach(function(c) {
          var opt = el('option', null, c);
          opt.value = c;
          ctl.appendChild(opt);
        });
        ctl.value = value === null ? '' : value;
        ctl.addEventListener('change', function() {
          obj[key] = ctl.value === '' ? null : ctl.value;
        });
      } else if (typeof value === 'number') {
        ctl = el('input');
        ctl.type = 'number';
        ctl.min = '0';
        ctl.step = INT_KEYS.indexOf(key) >= 0 ? '1' : 'any';
        if (key === 'age') ctl.max = '120';
        ctl.value = value;
        ctl.addEventListener('change', function() {
          var n = ctl.value === '' ? 0 : Number(ctl.value);
          obj[key] = INT_KEYS.indexOf(key) >= 0 ? Math.round(n) : n;
        });
      } else if ((typeof value === 'string' && DATE_RE.test(value)) || (value === null && key === 'date')) {
        ctl = el('input');
        ctl.type = 'date';
        ctl.value = value || '';
        ctl.addEventListener('change', function() {
          obj[key] = ctl.value === '' && nullable ? null : ctl.value;
        });
      } else {
        ctl = el('input');
        ctl.type = 'text';
        ctl.value = value || '';
        ctl.addEventListener('input', function() {
          obj[key] = ctl.value === '' && nullable ? null : ctl.value;
        });
      }

      wrap.appendChild(ctl);
      return wrap;
    }

    function renderGroup(parent, obj, key) {
      var fs = el('fieldset');
      fs.appendChild(el('legend', null, labelFor(key)));
      var list = el('div', 'group-list');

      function redraw() {
        list.textContent = '';
        obj[key].forEach(function(item, i) {
          var box = el('div', 'group-item');
          render(box, item, key);
          var remove = el('button', 'btn', 'Remove');
          remove.type = 'button';
          remove.addEventListener('click', function() {
            obj[key].splice(i, 1);
            redraw();
          });
          box.appendChild(remove);
          list.appendChild(box);
        });
      }

      var add = el('button', 'btn', 'Add ' + labelFor(key));
      add.type = 'button';
      add.addEventListener('click', function() {
        obj[key].push(JSON.parse(JSON.stringify(templates[key])));
        redraw();
      });

      fs.appendChild(list);
      fs.appendChild(add);
      parent.appendChild(fs);
      redraw();
    }

    function render(parent, obj, parentKey) {
      Object.keys(obj).forEach(function(key) {
        var value = obj[key];
        if (Array.isArray(value)) {
          renderGroup(parent, obj, key);
        } else if (value !== null && typeof value === 'object') {
          var fs = el('fieldset');
          fs.appendChild(el('legend', null, labelFor(key)));
          render(fs, value, key);
          parent.appendChild(fs);
        } else {
          parent.appendChild(input(obj, key, parentKey));
        }
      });
    }

    function cellText(value) {
      if (value === null || value === undefined) return '';
      if (typeof value === 'object') return JSON.stringify(value);
      return String(value);
    }

    function table(title, data) {
      var section = el('div');
      section.appendChild(el('h3', null, title));
      if (data.rows.length === 0) {
        section.appendChild(el('p', null, 'None reported.'));
        return section;
      }
      var t = el('table');
      var head = el('tr');
      data.columns.forEach(function(c) { head.appendChild(el('th', null, labelFor(c))); });
      t.appendChild(head);
      data.rows.forEach(function(row) {
        var tr = el('tr');
        row.forEach(function(v) { tr.appendChild(el('td', null, cellText(v))); });
        t.appendChild(tr);
      });
      section.appendChild(t);
      return section;
    }

    function bar(label, value, max, cls) {
      var row = el('div', 'bar-row');
      row.appendChild(el('span', 'bar-label', label + ' (' + value + ')'));
      var track = el('div', 'bar-track');
      var fill = el('div', 'bar-fill' + (cls ? ' ' + cls : ''));
      fill.style.width = Math.max(0, Math.min(100, (value / max) * 100)) + '%';
      track.appendChild(fill);
      row.appendChild(track);
      return row;
    }

    function chart(series) {
      var section = el('div');
      section.appendChild(el('h3', null, series.title));
      series.points.forEach(function(p) { section.appendChild(bar(p.label, p.value, series.max)); });
      return section;
    }

    function renderReport(report) {
      resultEl.textContent = '';
      resultEl.style.display = 'block';

      resultEl.appendChild(el('h2', null, 'Overall Risk'));
      var metrics = el('div', 'metrics');
      var score = el('div', 'metric band-' + report.overall.band);
      score.appendChild(el('div', null, 'Risk Score (%)'));
      score.appendChild(el('div', 'value', String(report.overall.score_percent)));
      metrics.appendChild(score);
      var category = el('div', 'metric band-' + report.overall.band);
      category.appendChild(el('div', null, 'Risk Category'));
      category.appendChild(el('div', 'value', report.overall.category));
      metrics.appendChild(category);
      resultEl.appendChild(metrics);
      resultEl.appendChild(el('p', null, report.overall.interpretation));
      if (report.overall.description) resultEl.appendChild(el('p', null, report.overall.description));

      resultEl.appendChild(el('h2', null, 'Risk Breakdown'));
      resultEl.appendChild(chart(report.charts.systemic_risks));
      resultEl.appendChild(table('Systemic Risks', report.tables.systemic_risks));
      resultEl.appendChild(chart(report.charts.comorbidity_impact));
      resultEl.appendChild(table('Comorbidity Impact', report.tables.comorbidity_impact));

      resultEl.appendChild(el('h2', null, 'Drug Interactions'));
      resultEl.appendChild(table('Interactions', report.tables.drug_interactions));

      resultEl.appendChild(el('h2', null, 'Special Population Warnings'));
      resultEl.appendChild(table('Warnings', report.tables.special_population_warnings));

      resultEl.appendChild(el('h2', null, 'Alternative Drugs'));
      var alts = el('div');
      report.charts.alternatives.forEach(function(a) {
        alts.appendChild(bar(a.name + ' efficacy', a.efficacy_score, 10));
        alts.appendChild(bar(a.name + ' safety', a.safety_score, 10, 'alt'));
      });
      resultEl.appendChild(alts);
      resultEl.appendChild(table('Alternatives', report.tables.alternative_drugs));

      resultEl.appendChild(el('h2', null, 'Summary'));
      resultEl.appendChild(el('p', null, report.summary));

      var link = el('a', 'btn', 'Download Results JSON');
      link.href = '/api/sessions/' + sessionId + '/result/download';
      link.setAttribute('download', 'risk_assessment.json');
      resultEl.appendChild(link);
    }

    function readJson(resp) {
      return resp.json().then(function(body) { return { ok: resp.ok, body: body }; });
    }

    btnAnalyze.addEventListener('click', function() {
      if (busy || !sessionId) return;
      busy = true;
      btnAnalyze.disabled = true;
      showStatus('Analyzing...', '');

      fetch('/api/sessions/' + sessionId + '/analyze', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(model)
      })
        .then(readJson)
        .then(function(res) {
          if (res.ok) {
            showStatus('', '');
            renderReport(res.body.report);
          } else {
            showStatus('Error: ' + (res.body.error ? res.body.error.message : 'analysis failed'), 'error');
          }
        })
        .catch(function() {
          showStatus('Error: the form server could not be reached.', 'error');
        })
        .finally(function() {
          busy = false;
          btnAnalyze.disabled = false;
        });
    });

    window.addEventListener('pagehide', function() {
      if (sessionId) fetch('/api/sessions/' + sessionId, { method: 'DELETE', keepalive: true });
    });

    Promise.all([
      fetch('/api/form/defaults').then(readJson),
      fetch('/api/sessions', { method: 'POST' }).then(readJson)
    ]).then(function(results) {
      var defaults = results[0].body;
      model = defaults.record;
      templates = defaults.templates;
      choices = defaults.choices;
      sessionId = results[1].body.session_id;
      render(formEl, model, null);
      btnAnalyze.disabled = false;
    }).catch(function() {
      showStatus('Error: could not load the form.', 'error');
    });
  </script>
</body>
</html>
"#;
