pub(super) const INDEX_HTML: &str = r##"<!DOCTYPE html>
  <html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0"/>
    <title>Portmap</title>
    <link
      rel="stylesheet"
      href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css"
      integrity="sha256-p4NxAoJBhIIN+hmNHrzRCf9tD/miZyoHS5obTRR9BMY="
      crossorigin=""
    />
    <style>
      html, body { height: 100%; margin: 0; padding: 0; }
      #panel {
        position: absolute;
        top: 12px;
        left: 50px;
        z-index: 1000;
        background: white;
        padding: 10px;
        border-radius: 4px;
        box-shadow: 0 1px 4px rgba(0,0,0,0.3);
        width: 280px;
        max-height: 85%;
        overflow-y: auto;
        font: 13px sans-serif;
      }
      #panel h3 { margin: 4px 0 8px 0; font-size: 14px; }
      .layer-row { display: flex; align-items: center; gap: 6px; margin: 4px 0; }
      .layer-row .dot { width: 10px; height: 10px; border-radius: 50%; flex: none; }
      .layer-row .name { flex: 1; }
      .layer-row button { border: 0; background: none; cursor: pointer; color: #b91c1c; }
      #upload-form input, #upload-form button { width: 100%; margin: 3px 0; box-sizing: border-box; }
      #status { margin-top: 6px; font-size: 12px; }
      #status.error { color: #b91c1c; }
      #status.success { color: #15803d; }
      #map { height: 100%; width: 100%; }
    </style>
  </head>
  <body>
    <div id="panel">
      <h3>Camadas</h3>
      <div id="layer-list"></div>
      <hr />
      <h3>Importar</h3>
      <form id="upload-form">
        <input type="file" name="file" accept=".kml,.zip,.json,.geojson" required />
        <input type="text" name="name" placeholder="Nome da camada" />
        <input type="text" name="description" placeholder="Descrição (opcional)" />
        <input type="color" name="color" value="#3b82f6" />
        <button type="submit" id="upload-button">Adicionar Camada</button>
      </form>
      <div id="status"></div>
    </div>

    <div id="map"></div>

    <script
      src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"
      integrity="sha256-20nQCchB9co0qIjJZRGuk2/Z9VM+kNiyxNV1lvTlZBo="
      crossorigin=""
    ></script>

    <script>
      const layerList = document.getElementById('layer-list');
      const uploadForm = document.getElementById('upload-form');
      const uploadButton = document.getElementById('upload-button');
      const status = document.getElementById('status');

      const map = L.map('map').setView([-2.570, -44.370], 14);

      L.tileLayer('https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png', {
        maxZoom: 19,
        attribution: '&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors &copy; <a href="https://carto.com/attributions">CARTO</a>'
      }).addTo(map);

      let drawn = [];

      function popupHtml(layer) {
        const title = (layer.details && layer.details.title) || layer.name;
        const content = (layer.details && layer.details.content) || layer.description;
        return `<b>${title}</b><br/>${content}`;
      }

      function drawFeature(layer, feature, index) {
        const options = { color: layer.color, fillColor: layer.color, fillOpacity: 0.4, weight: 2 };
        let primitive = null;
        if (feature.type === 'POLYGON') {
          const rings = feature.data.map(ring => ring.map(p => [p.lat, p.lng]));
          primitive = L.polygon(rings, options);
        } else if (feature.type === 'POLYLINE') {
          primitive = L.polyline(feature.data.map(p => [p.lat, p.lng]), { color: layer.color, weight: 3 });
        } else if (feature.type === 'MARKER') {
          primitive = L.marker([feature.data.lat, feature.data.lng]);
        }
        if (primitive) {
          primitive.options.key = `${layer.id}-f-${index}`;
          primitive.bindPopup(popupHtml(layer));
          primitive.addTo(map);
          drawn.push(primitive);
        }
      }

      function renderLayers(layers) {
        drawn.forEach(p => map.removeLayer(p));
        drawn = [];
        layerList.innerHTML = '';

        layers.forEach(layer => {
          if (layer.visible) {
            layer.features.forEach((feature, index) => drawFeature(layer, feature, index));
          }

          const row = document.createElement('div');
          row.className = 'layer-row';

          const dot = document.createElement('span');
          dot.className = 'dot';
          dot.style.background = layer.color;

          const checkbox = document.createElement('input');
          checkbox.type = 'checkbox';
          checkbox.checked = layer.visible;
          checkbox.addEventListener('change', async () => {
            await fetch(`/layers/${layer.id}/toggle`, { method: 'POST' });
            refresh();
          });

          const name = document.createElement('span');
          name.className = 'name';
          name.textContent = layer.name;
          name.title = layer.description;

          row.append(checkbox, dot, name);

          if (layer.id.startsWith('custom-')) {
            const remove = document.createElement('button');
            remove.textContent = '✕';
            remove.title = 'Remover camada';
            remove.addEventListener('click', async () => {
              await fetch(`/layers/${layer.id}`, { method: 'DELETE' });
              refresh();
            });
            row.append(remove);
          }

          layerList.append(row);
        });
      }

      async function refresh() {
        const res = await fetch('/layers');
        renderLayers(await res.json());
      }

      uploadForm.addEventListener('submit', async (event) => {
        event.preventDefault();
        uploadButton.disabled = true;
        uploadButton.textContent = 'Processando...';
        status.textContent = '';
        try {
          const res = await fetch('/layers', { method: 'POST', body: new FormData(uploadForm) });
          if (!res.ok) {
            throw new Error(await res.text());
          }
          status.className = 'success';
          status.textContent = 'Camada adicionada com sucesso!';
          uploadForm.reset();
          refresh();
        } catch (err) {
          status.className = 'error';
          status.textContent = err.message || 'Erro ao processar arquivo.';
        } finally {
          uploadButton.disabled = false;
          uploadButton.textContent = 'Adicionar Camada';
        }
      });

      refresh().catch(console.error);
    </script>
  </body>
  </html>
"##;
