//! Small documents in both grammars.

/// Version 5 document: one theme with a master layer holding a rule, one
/// slide over it with a red box, a text body and an image.
pub(crate) const KEY2_DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<key:presentation xmlns:key="http://developer.apple.com/namespaces/keynote2"
    xmlns:sf="http://developer.apple.com/namespaces/sf"
    xmlns:sfa="http://developer.apple.com/namespaces/sfa" key:version="92008102400">
  <key:size sfa:w="800" sfa:h="600"/>
  <key:theme-list>
    <key:theme sfa:ID="theme-1">
      <key:stylesheet sfa:ID="theme-sheet">
        <sf:styles>
          <sf:graphic-style sfa:ID="gs-red" sf:ident="red">
            <sf:property-map>
              <sf:fill><sf:color sfa:r="1" sfa:g="0" sfa:b="0"/></sf:fill>
            </sf:property-map>
          </sf:graphic-style>
          <sf:characterstyle sfa:ID="cs-bold">
            <sf:property-map>
              <sf:bold><sf:number sfa:number="1"/></sf:bold>
            </sf:property-map>
          </sf:characterstyle>
        </sf:styles>
      </key:stylesheet>
      <key:master-slides>
        <key:master-slide sfa:ID="master-1">
          <key:page>
            <sf:layers>
              <sf:layer sfa:ID="master-layer">
                <sf:drawables>
                  <sf:line sfa:ID="rule">
                    <sf:head sfa:x="0" sfa:y="590"/>
                    <sf:tail sfa:x="800" sfa:y="590"/>
                  </sf:line>
                </sf:drawables>
              </sf:layer>
            </sf:layers>
          </key:page>
        </key:master-slide>
      </key:master-slides>
    </key:theme>
  </key:theme-list>
  <key:slide-list>
    <key:slide sfa:ID="slide-1">
      <key:page>
        <sf:layers>
          <key:proxy-master-layer><sf:layer-ref sfa:IDREF="master-layer"/></key:proxy-master-layer>
          <sf:layer sfa:ID="content">
            <sf:drawables>
              <sf:drawable-shape sfa:ID="box">
                <sf:geometry><sf:naturalSize sfa:w="10" sfa:h="10"/><sf:position sfa:x="100" sfa:y="50"/></sf:geometry>
                <sf:style><sf:graphic-style-ref sfa:IDREF="gs-red"/></sf:style>
                <sf:path><sf:bezier-path><sf:bezier sfa:ID="box-path" sfa:path="M 0 0 L 10 0 L 10 10 Z"/></sf:bezier-path></sf:path>
              </sf:drawable-shape>
              <key:body-placeholder sfa:ID="body">
                <sf:geometry><sf:naturalSize sfa:w="400" sfa:h="100"/><sf:position sfa:x="50" sfa:y="200"/></sf:geometry>
                <sf:text><sf:text-storage><sf:text-body><sf:p>Hello <sf:span sf:style="cs-bold">world</sf:span></sf:p></sf:text-body></sf:text-storage></sf:text>
              </key:body-placeholder>
              <sf:image sfa:ID="picture">
                <sf:geometry><sf:naturalSize sfa:w="64" sfa:h="48"/><sf:position sfa:x="0" sfa:y="0"/></sf:geometry>
                <sf:data sfa:ID="picture-data" sf:path="photo.png" sf:displayname="photo.png"/>
              </sf:image>
            </sf:drawables>
          </sf:layer>
        </sf:layers>
      </key:page>
    </key:slide>
  </key:slide-list>
</key:presentation>
"#;

/// Version 1 document: a master slide with a frame, one slide with a line,
/// a text box, bullets and notes.
pub(crate) const KEY1_DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<presentation xmlns="http://developer.apple.com/schemas/APXL" version="36">
  <size w="640" h="480"/>
  <theme>
    <master-slides>
      <master-slide id="m1">
        <drawables>
          <shape id="frame" path="M 0 0 L 640 0 L 640 480 Z" natural-size="640 480" position="0 0"
              fill="none" stroke-color="0 0 1" stroke-width="2"/>
        </drawables>
      </master-slide>
    </master-slides>
  </theme>
  <slide-list>
    <slide id="s1" master-slide-id="m1">
      <drawables>
        <line id="l1" head="10 10" tail="20 20"/>
        <textbox id="t1" natural-size="200 40" position="20 400" font-size="18"><content>Legacy <span bold="true">text</span></content></textbox>
      </drawables>
      <bullets id="b1" natural-size="600 300" position="20 60">
        <bullet level="1"><content>First</content></bullet>
      </bullets>
      <notes>Speaker notes</notes>
    </slide>
  </slide-list>
</presentation>
"#;
